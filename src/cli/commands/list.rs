//! List stored content

use std::path::Path;
use std::sync::Arc;

use folio::adapters::JsonFileStore;
use folio::config::SiteConfig;
use folio::core::models::{ContentKind, EducationEntry, Project, Skill};
use folio::core::ports::DocumentStore;
use folio::core::services::ContentRepository;
use folio::output::{ListResult, OutputMode, Summary};

use crate::cli::app::Collection;

/// Print one collection, grouped by category
pub fn list(config: Option<&Path>, collection: Collection, mode: OutputMode) -> anyhow::Result<()> {
    let site = SiteConfig::load(config)?;
    let store: Arc<dyn DocumentStore> = Arc::new(JsonFileStore::open(site.storage.data_dir())?);

    let result = match collection {
        Collection::Projects => fetch::<Project>(store)?,
        Collection::Skills => fetch::<Skill>(store)?,
        Collection::Education => fetch::<EducationEntry>(store)?,
    };
    result.render(mode);
    Ok(())
}

fn fetch<K: ContentKind + Summary>(store: Arc<dyn DocumentStore>) -> anyhow::Result<ListResult> {
    let snapshot = ContentRepository::<K>::new(store).fetch()?;
    Ok(ListResult::from_snapshot(&snapshot))
}
