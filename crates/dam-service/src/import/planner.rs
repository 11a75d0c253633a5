//! Folder import ordering.
//!
//! The DAM only accepts an `AddFolder` once the folder's parent exists, but
//! the legacy catalog lists collections in arbitrary order. The planner
//! buffers the whole batch and orders it so every parent is created before
//! its children, however deep the forward references go.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_core::types::FolderId;
use dam_entity::FolderLabel;
use dam_entity::command::AddFolder;

/// A folder as read from the source catalog, before ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderDescriptor {
    /// Source id, reused as the DAM folder id.
    pub id: FolderId,
    /// Folder label.
    pub label: FolderLabel,
    /// Parent folder, if any.
    pub parent_id: Option<FolderId>,
}

/// An ordered folder import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPlan {
    /// Commands in a parent-before-child order.
    pub commands: Vec<AddFolder>,
    /// Folders whose parent was not part of the batch and that were
    /// imported as roots instead.
    pub orphaned: Vec<FolderId>,
}

impl FolderPlan {
    /// Number of planned commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is planned.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Orders a batch of folder descriptors into `AddFolder` commands.
///
/// Input order is kept wherever the hierarchy allows it. A parent that is
/// not part of the batch is dropped and the folder becomes a root.
///
/// # Errors
///
/// * `Validation` if the batch exceeds `max_batch_size` or an id repeats.
/// * `Dependency` if a folder is its own parent or ancestor. No commands
///   are returned in that case.
pub fn plan_folders(
    descriptors: Vec<FolderDescriptor>,
    max_batch_size: usize,
) -> AppResult<FolderPlan> {
    if descriptors.len() > max_batch_size {
        return Err(AppError::validation(format!(
            "Folder batch of {} exceeds the limit of {max_batch_size}",
            descriptors.len()
        )));
    }

    let mut index: HashMap<FolderId, usize> = HashMap::with_capacity(descriptors.len());
    for (position, descriptor) in descriptors.iter().enumerate() {
        if index.insert(descriptor.id, position).is_some() {
            return Err(AppError::validation(format!(
                "Folder {} appears more than once in the batch",
                descriptor.id
            )));
        }
        if descriptor.parent_id == Some(descriptor.id) {
            return Err(AppError::dependency(format!(
                "Folder {} is its own parent",
                descriptor.id
            )));
        }
    }

    let mut orphaned = Vec::new();
    let parents: Vec<Option<usize>> = descriptors
        .iter()
        .map(|descriptor| {
            let parent_id = descriptor.parent_id?;
            let parent = index.get(&parent_id).copied();
            if parent.is_none() {
                warn!(
                    folder_id = %descriptor.id,
                    parent_id = %parent_id,
                    "Parent folder is not part of the import, importing as root"
                );
                orphaned.push(descriptor.id);
            }
            parent
        })
        .collect();

    let order = topological_order(&descriptors, &parents)?;

    let mut slots: Vec<Option<FolderDescriptor>> = descriptors.into_iter().map(Some).collect();
    let mut commands = Vec::with_capacity(order.len());
    for position in order {
        let Some(descriptor) = slots[position].take() else {
            continue;
        };
        let parent_id = parents[position].and(descriptor.parent_id);
        commands.push(AddFolder {
            folder_id: descriptor.id,
            label: descriptor.label,
            parent_id,
        });
    }

    debug!(
        folders = commands.len(),
        orphaned = orphaned.len(),
        "Folder import planned"
    );
    Ok(FolderPlan { commands, orphaned })
}

/// Walks each descriptor's ancestor chain up to a root or an already
/// placed folder and places that chain top-down.
fn topological_order(
    descriptors: &[FolderDescriptor],
    parents: &[Option<usize>],
) -> AppResult<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; descriptors.len()];
    let mut order = Vec::with_capacity(descriptors.len());
    let mut chain: Vec<usize> = Vec::new();

    for start in 0..descriptors.len() {
        if marks[start] == Mark::Done {
            continue;
        }

        chain.clear();
        let mut cursor = Some(start);
        while let Some(position) = cursor {
            match marks[position] {
                Mark::Done => break,
                Mark::InProgress => {
                    let entry = chain.iter().position(|&p| p == position).unwrap_or(0);
                    let ids: Vec<String> = chain[entry..]
                        .iter()
                        .map(|&p| descriptors[p].id.to_string())
                        .collect();
                    return Err(AppError::dependency(format!(
                        "Folder hierarchy contains a cycle: {}",
                        ids.join(" -> ")
                    )));
                }
                Mark::Unvisited => {
                    marks[position] = Mark::InProgress;
                    chain.push(position);
                    cursor = parents[position];
                }
            }
        }

        for &position in chain.iter().rev() {
            marks[position] = Mark::Done;
            order.push(position);
        }
    }

    Ok(order)
}
