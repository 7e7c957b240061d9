// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of the `/list` report.

use opsdesk_core::OpenTask;

/// Render open tasks grouped by assignee into one message.
///
/// Assigned groups appear in the order their assignee is first seen in the
/// input; tasks with no assignee are grouped under `Unassigned` at the end.
/// One line per task: `{id}. {title} {priority}`.
pub fn render_open_tasks(tasks: &[OpenTask]) -> String {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut unassigned: Vec<String> = Vec::new();

    for task in tasks {
        let line = format!("{}. {} {}", task.id, task.title, task.priority);
        match (&task.assignee_id, &task.assignee_name) {
            (Some(_), name) => {
                // A directory gap still gets a header, keyed by the raw id.
                let header = name
                    .clone()
                    .unwrap_or_else(|| format!("User {}", task.assignee_id.unwrap_or_default()));
                match groups.iter_mut().find(|(h, _)| *h == header) {
                    Some((_, lines)) => lines.push(line),
                    None => groups.push((header, vec![line])),
                }
            }
            (None, _) => unassigned.push(line),
        }
    }

    if !unassigned.is_empty() {
        groups.push(("Unassigned".to_string(), unassigned));
    }

    groups
        .into_iter()
        .map(|(header, lines)| format!("{header}:\n{}", lines.join("\n")))
        .collect::<Vec<_>>()
        .join("\n\n")
}
