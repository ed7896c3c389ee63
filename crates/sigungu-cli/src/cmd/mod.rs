pub mod completions;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod provinces;
pub mod reset;
pub mod show;
pub mod stats;
pub mod toggle;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use sigungu_core::config::{EffectiveConfig, PROJECT_DIR};
use sigungu_core::{
    Atlas, Conquest, District, DistrictStatus, ErrorCode, FeatureCollection, JsonFileStorage,
    Membership, PersistentStore, VisitStateStore,
};

use crate::output::{CliError, OutputMode, render_error};

/// Everything a command needs from the resolved environment.
#[derive(Debug)]
pub struct Context {
    pub project_root: PathBuf,
    pub config: EffectiveConfig,
    pub output: OutputMode,
    pub dataset_override: Option<PathBuf>,
}

impl Context {
    pub fn dataset_path(&self) -> PathBuf {
        self.dataset_override.as_ref().map_or_else(
            || self.config.dataset_path(&self.project_root),
            |path| self.project_root.join(path),
        )
    }

    /// Fail with `NotInitialized` unless `.sigungu/` exists.
    pub fn require_project(&self) -> Result<()> {
        if self.project_root.join(PROJECT_DIR).is_dir() {
            return Ok(());
        }
        let code = ErrorCode::NotInitialized;
        render_error(
            self.output,
            &CliError::with_details(
                code.message(),
                code.hint().unwrap_or_default(),
                code.code(),
            ),
        )?;
        anyhow::bail!("{}: {}", code.code(), code.message());
    }

    pub fn open_store(&self) -> Result<PersistentStore<JsonFileStorage>> {
        self.require_project()?;
        let storage = JsonFileStorage::new(
            self.config.state_path(&self.project_root),
            self.config.project.storage.lock_timeout(),
        );
        core_result(self.output, PersistentStore::open(storage))
    }

    pub fn load_atlas(&self) -> Result<Atlas> {
        let collection = core_result(
            self.output,
            FeatureCollection::from_path(&self.dataset_path()),
        )?;
        Ok(Atlas::new(collection))
    }
}

/// Render a core error in the current output mode before propagating it.
pub fn core_result<T>(output: OutputMode, result: sigungu_core::Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(err.into())
        }
    }
}

/// Card payload shared by `sgg toggle` and `sgg show`.
#[derive(Debug, Serialize)]
pub struct DistrictCard {
    pub district: District,
    pub membership: Membership,
    pub fill_color: &'static str,
    pub status: DistrictStatus,
    pub label: String,
    pub label_color: &'static str,
    pub conquest: Conquest,
}

impl DistrictCard {
    pub fn build(atlas: &Atlas, store: &VisitStateStore, district: &District) -> Self {
        let membership = store.membership(&district.display_name);
        let conquest = atlas.conquest(store, district);
        let status = store.status(&district.display_name, &conquest);
        Self {
            district: district.clone(),
            membership,
            fill_color: membership.fill_color(),
            status,
            label: status.label(),
            label_color: status.color(),
            conquest,
        }
    }

    pub fn render_human(&self, w: &mut dyn std::io::Write, pretty: bool) -> std::io::Result<()> {
        use crate::output::{pretty_kv, pretty_section};

        if !pretty {
            return writeln!(
                w,
                "{}\t{}\t{}\t{}/{}",
                self.district.display_name,
                self.membership,
                self.label,
                self.conquest.visited,
                self.conquest.total
            );
        }

        pretty_section(w, &self.district.display_name)?;
        pretty_kv(w, "code", &self.district.code)?;
        pretty_kv(w, "status", &self.label)?;
        if let Some(province) = self.conquest.province_name {
            pretty_kv(
                w,
                "province",
                format!(
                    "{province} {}/{}{}",
                    self.conquest.visited,
                    self.conquest.total,
                    if self.conquest.conquered { " (conquered)" } else { "" }
                ),
            )?;
        }
        Ok(())
    }
}

pub fn relative_to(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
