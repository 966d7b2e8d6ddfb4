use crate::changelog::{Changelog, ChangelogSection};
use crate::domain::CommitRecord;
use crate::sections::SectionMap;
use std::collections::HashMap;

/// Group commits into changelog sections.
///
/// Sections follow the section map's declaration order; commits keep their
/// relative input order inside a section. Types sharing a title land in one
/// section, placed where that title first appears. Untyped commits and
/// commits whose type is unmapped or hidden are left out, and empty sections
/// are omitted.
pub fn build_changelog<'a, I>(commits: I, sections: &SectionMap) -> Changelog
where
    I: IntoIterator<Item = &'a CommitRecord>,
{
    let mut grouped: Vec<ChangelogSection> = Vec::new();
    let mut slot_of: HashMap<&str, usize> = HashMap::new();

    for entry in sections.visible() {
        let slot = match grouped.iter().position(|s| s.title == entry.title) {
            Some(slot) => slot,
            None => {
                grouped.push(ChangelogSection {
                    title: entry.title.clone(),
                    commits: Vec::new(),
                });
                grouped.len() - 1
            }
        };
        slot_of.insert(entry.commit_type.as_str(), slot);
    }

    for commit in commits {
        if commit.is_untyped() {
            continue;
        }
        if let Some(&slot) = slot_of.get(commit.commit_type.as_str()) {
            grouped[slot].commits.push(commit.clone());
        }
    }

    grouped.retain(|section| !section.commits.is_empty());
    Changelog::from_sections(grouped)
}
