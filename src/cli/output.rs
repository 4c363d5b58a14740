use serde::Serialize;

use crate::model::backlog::BacklogItem;
use crate::model::task::{Task, TaskStatus};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    pub id: String,
    pub content: String,
    pub quadrant: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl TaskJson {
    pub fn from_task(task: &Task) -> Self {
        TaskJson {
            id: task.id.to_string(),
            content: task.content.clone(),
            quadrant: task.quadrant.key(),
            status: match task.status {
                TaskStatus::Todo => "todo",
                TaskStatus::InProgress => "in-progress",
                TaskStatus::Done => "done",
            },
            labels: task.labels.clone(),
            urls: task.urls.clone(),
            created_at: task.created_at.to_rfc3339(),
            completed_at: task.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantJson {
    pub quadrant: &'static str,
    pub name: &'static str,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct BoardJson {
    pub quadrants: Vec<QuadrantJson>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogItemJson {
    pub id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    pub created_at: String,
}

impl BacklogItemJson {
    pub fn from_item(item: &BacklogItem) -> Self {
        BacklogItemJson {
            id: item.id.to_string(),
            content: item.content.clone(),
            labels: item.labels.clone(),
            urls: item.urls.clone(),
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Shortened id shown in text output; any unique prefix resolves back
pub fn short_id(task_id: &uuid::Uuid) -> String {
    task_id.to_string()[..8].to_string()
}

/// One text line for a task: id, status badge, content, labels, links
pub fn task_line(task: &Task) -> String {
    let mut line = format!(
        "  {} [{}] {}",
        short_id(&task.id),
        task.status.badge(),
        task.content
    );
    for label in &task.labels {
        line.push_str(&format!(" #{}", label));
    }
    for url in &task.urls {
        line.push_str(&format!(" <{}>", url));
    }
    line
}

/// One text line for a backlog item
pub fn backlog_line(item: &BacklogItem) -> String {
    let mut line = format!("  {} {}", short_id(&item.id), item.content);
    for label in &item.labels {
        line.push_str(&format!(" #{}", label));
    }
    for url in &item.urls {
        line.push_str(&format!(" <{}>", url));
    }
    line
}

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
