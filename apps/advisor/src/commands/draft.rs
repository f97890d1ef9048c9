use std::path::Path;

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::form::{validate, ChipField, FormDraft, LanguageRow, ScalarField};
use crate::render::{render_draft, render_field_errors};

/// Writes the seeded draft. Refuses to clobber an existing file unless forced.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Draft '{}' already exists (use --force to overwrite)",
            path.display()
        );
    }
    FormDraft::default().save(path)?;
    info!("Wrote default draft to {}", path.display());
    println!("Created {}", path.display());
    Ok(())
}

pub fn show(path: &Path) -> Result<()> {
    let draft = FormDraft::load(path)?;
    print!("{}", render_draft(&draft));
    Ok(())
}

pub fn add(path: &Path, field: ChipField, value: &str) -> Result<()> {
    edit(path, |draft| {
        if !draft.chips_mut(field).add(value) {
            warn!("'{}' not added to {field}: blank or already present", value.trim());
        }
        Ok(())
    })
}

pub fn remove(path: &Path, field: ChipField, index: usize) -> Result<()> {
    edit(path, |draft| match draft.chips_mut(field).remove(index) {
        Some(removed) => {
            info!("Removed '{removed}' from {field}");
            Ok(())
        }
        None => bail!("{field} has no entry at index {index}"),
    })
}

pub fn set(path: &Path, field: ScalarField, value: &str) -> Result<()> {
    edit(path, |draft| draft.set(field, value))
}

/// Updates the language row at `index`, or appends a new row.
pub fn set_language(path: &Path, index: Option<usize>, language: &str, level: &str) -> Result<()> {
    let row = LanguageRow::new(language, level);
    edit(path, |draft| {
        match index {
            Some(i) => {
                if !draft.update_language(i, row) {
                    bail!("No language row at index {i}");
                }
            }
            None => draft.add_language(row),
        }
        Ok(())
    })
}

pub fn remove_language(path: &Path, index: usize) -> Result<()> {
    edit(path, |draft| match draft.remove_language(index) {
        Some(_) => Ok(()),
        None => bail!("No language row at index {index}"),
    })
}

/// Runs local validation only. Fails when any field is invalid.
pub fn check(path: &Path) -> Result<()> {
    let draft = FormDraft::load(path)?;
    match validate(&draft) {
        Ok(_) => {
            println!("Draft is valid.");
            Ok(())
        }
        Err(errors) => {
            print!("{}", render_field_errors(&errors));
            bail!("{} field(s) need attention", errors.len())
        }
    }
}

fn edit(path: &Path, change: impl FnOnce(&mut FormDraft) -> Result<()>) -> Result<()> {
    let mut draft = FormDraft::load(path)?;
    change(&mut draft)?;
    draft.save(path)
}
