//! Client-side projection of the deadline collection: stable single-key
//! sort, 1-indexed pagination, and the page-scoped selection set.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::model::Deadline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    DueDate,
    TaskDescription,
    ProcessNumber,
    Kind,
    Status,
    Classification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Current sort key and direction, with the toggle rule from the table
/// header: re-selecting the active field flips direction, selecting a new
/// field resets to ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            field: SortField::DueDate,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    pub fn toggle(self, field: SortField) -> SortState {
        if field == self.field {
            SortState {
                field,
                direction: match self.direction {
                    SortDirection::Asc => SortDirection::Desc,
                    SortDirection::Desc => SortDirection::Asc,
                },
            }
        } else {
            SortState {
                field,
                direction: SortDirection::Asc,
            }
        }
    }
}

fn compare_str(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.unwrap_or_default().to_lowercase();
    let b = b.unwrap_or_default().to_lowercase();
    a.cmp(&b)
}

fn compare_by(a: &Deadline, b: &Deadline, field: SortField) -> Ordering {
    match field {
        SortField::DueDate => a.due_date.timestamp().cmp(&b.due_date.timestamp()),
        SortField::TaskDescription => {
            compare_str(Some(&a.task_description), Some(&b.task_description))
        }
        SortField::ProcessNumber => {
            compare_str(a.process_number.as_deref(), b.process_number.as_deref())
        }
        SortField::Kind => compare_str(a.kind.as_deref(), b.kind.as_deref()),
        SortField::Status => compare_str(Some(a.status.wire_value()), Some(b.status.wire_value())),
        SortField::Classification => compare_str(
            Some(a.classification.wire_value()),
            Some(b.classification.wire_value()),
        ),
    }
}

/// One page of the sorted collection.
#[derive(Debug, Clone)]
pub struct Projection {
    pub page_items: Vec<Deadline>,
    pub total_count: usize,
    pub total_pages: usize,
}

/// Sort then paginate. `page` is 1-indexed; an out-of-range page yields an
/// empty item list. `total_pages` is at least 1 even for an empty
/// collection.
pub fn project(
    deadlines: &[Deadline],
    sort: SortState,
    page: usize,
    page_size: usize,
) -> Projection {
    let page_size = page_size.max(1);
    let mut sorted: Vec<Deadline> = deadlines.to_vec();
    // sort_by is stable, so equal keys keep their input order in either
    // direction (Equal is unaffected by reverse()).
    sorted.sort_by(|a, b| {
        let ord = compare_by(a, b, sort.field);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    let total_count = sorted.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    tracing::debug!(total_count, total_pages, page, "projected collection");
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let page_items = if start >= total_count {
        Vec::new()
    } else {
        sorted[start..(start + page_size).min(total_count)].to_vec()
    };

    Projection {
        page_items,
        total_count,
        total_pages,
    }
}

/// Set of selected deadline ids, tracked independently of pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// "Select all" scoped to the current page: if every page id is
    /// already selected, deselect exactly those; otherwise select them
    /// all. Ids from other pages are never touched.
    pub fn toggle_page<'a, I>(&mut self, page_ids: I)
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        let all_selected = page_ids
            .clone()
            .into_iter()
            .all(|id| self.ids.contains(id));
        for id in page_ids {
            if all_selected {
                self.ids.remove(id);
            } else {
                self.ids.insert(id.to_string());
            }
        }
    }

    /// Keep only the given ids (used to hold on to a failed subset after a
    /// bulk operation).
    pub fn retain_only(&mut self, keep: &[String]) {
        self.ids.retain(|id| keep.contains(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
