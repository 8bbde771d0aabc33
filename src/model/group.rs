use std::collections::BTreeMap;

use serde::Serialize;

use super::container::ContainerSummary;
use super::session::SessionState;

/// Containers sharing an image family key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
    pub key: String,
    pub containers: Vec<ContainerSummary>,
}

/// One selectable line of the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardRow {
    GroupHeader { group: usize },
    Container { group: usize, member: usize },
}

/// Family key of an image reference.
///
/// Equivalent to an anchored match of `([\w\-/]+?)[-:].*`: the shortest
/// non-empty prefix of word characters, `-` and `/` that is directly followed
/// by `-` or `:`. Images without such a prefix are their own key, so
/// `registry.io/app:1` is not split (the `.` ends the prefix class).
/// Untagged images shown as `sha256:` digests each keep their own group.
pub fn group_key(image: &str) -> &str {
    if image.starts_with("sha256:") {
        return image;
    }
    for (i, c) in image.char_indices() {
        if i > 0 && (c == '-' || c == ':') {
            return &image[..i];
        }
        if !(c.is_alphanumeric() || c == '_' || c == '-' || c == '/') {
            break;
        }
    }
    image
}

/// Partition a listing into groups sorted by key. Members keep listing order.
pub fn group_containers(containers: Vec<ContainerSummary>) -> Vec<Group> {
    let mut by_key: BTreeMap<String, Vec<ContainerSummary>> = BTreeMap::new();
    for c in containers {
        by_key.entry(group_key(&c.image).to_string()).or_default().push(c);
    }
    by_key
        .into_iter()
        .map(|(key, containers)| Group { key, containers })
        .collect()
}

/// Flatten groups into the rows the cursor walks over.
pub fn build_rows(groups: &[Group], session: &SessionState) -> Vec<DashboardRow> {
    let mut rows = Vec::new();
    for (gi, group) in groups.iter().enumerate() {
        rows.push(DashboardRow::GroupHeader { group: gi });
        if session.is_collapsed(&group.key) {
            continue;
        }
        for mi in 0..group.containers.len() {
            rows.push(DashboardRow::Container { group: gi, member: mi });
        }
    }
    rows
}
