use indexmap::IndexMap;

use super::OsmAction;

/// tags of an OSM object, in document order.
pub type OsmTags = IndexMap<String, String>;

pub const FIXME_TAG: &str = "fixme";
pub const TODO_PREFIX: &str = "TODO: ";
const FIXME_SEPARATOR: char = ';';

/// tag access and annotation shared by nodes, ways and relations. every
/// mutation through this trait marks the object as modified.
pub trait OsmElement {
    fn tags(&self) -> &OsmTags;

    fn tags_mut(&mut self) -> &mut OsmTags;

    fn action(&self) -> Option<OsmAction>;

    fn set_action(&mut self, action: Option<OsmAction>);

    fn mark_modified(&mut self) {
        self.set_action(Some(OsmAction::Modify));
    }

    fn is_modified(&self) -> bool {
        self.action() == Some(OsmAction::Modify)
    }

    fn get_tag(&self, key: &str) -> Option<&str> {
        self.tags().get(key).map(|v| v.as_str())
    }

    /// true when the tag is present with a non-empty value.
    fn has_tag(&self, key: &str) -> bool {
        self.get_tag(key).is_some_and(|v| !v.is_empty())
    }

    fn tag_equals(&self, key: &str, value: &str) -> bool {
        self.get_tag(key) == Some(value)
    }

    /// writes the tag only if its value differs. returns true on change.
    fn test_and_set(&mut self, key: &str, value: &str) -> bool {
        if self.tag_equals(key, value) {
            return false;
        }
        self.tags_mut().insert(key.to_string(), value.to_string());
        self.mark_modified();
        true
    }

    fn remove_tag(&mut self, key: &str) -> Option<String> {
        let removed = self.tags_mut().shift_remove(key);
        if removed.is_some() {
            self.mark_modified();
        }
        removed
    }

    /// the `;`-separated notes of the fixme tag.
    fn fixme_notes(&self) -> Vec<&str> {
        match self.get_tag(FIXME_TAG) {
            Some(fixme) if !fixme.is_empty() => fixme.split(FIXME_SEPARATOR).collect(),
            _ => vec![],
        }
    }

    /// prepends `TODO: <text>` to the fixme tag unless the same note is
    /// already present. returns true when the note was added.
    fn add_todo_fixme(&mut self, text: &str) -> bool {
        let note = format!("{TODO_PREFIX}{text}");
        if self.fixme_notes().contains(&note.as_str()) {
            return false;
        }
        let fixme = match self.get_tag(FIXME_TAG) {
            Some(existing) if !existing.is_empty() => {
                format!("{note}{FIXME_SEPARATOR}{existing}")
            }
            _ => note,
        };
        self.tags_mut().insert(FIXME_TAG.to_string(), fixme);
        self.mark_modified();
        true
    }
}
