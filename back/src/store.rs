use chrono::{DateTime, Duration, Utc};
use todo_api::v1::{NewTodo, Priority, Stats, Todo, TodoPatch};
use tokio::sync::{Mutex, RwLock};

use crate::error::{Error, Result};

const PRIORITY_MESSAGE: &str = "Priority must be 'low', 'medium', or 'high'";

/// In-memory todo collection.
///
/// The collection and the id counter sit behind separate locks. The counter
/// lock is always released before the collection lock is taken, so the two
/// are never held together.
#[derive(Debug)]
pub struct Store {
    todos: RwLock<Vec<Todo>>,
    next_id: Mutex<u64>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            todos: RwLock::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn next_id(&self) -> u64 {
        let mut next_id = self.next_id.lock().await;
        let id = *next_id;
        *next_id += 1;
        id
    }

    pub async fn list(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }

    pub async fn get(&self, id: u64) -> Option<Todo> {
        let todos = self.todos.read().await;
        todos.iter().find(|todo| todo.id == id).cloned()
    }

    pub async fn create(&self, input: NewTodo) -> Result<Todo> {
        if input.title.is_empty() || input.description.is_empty() {
            return Err(Error::validation("Title and description are required"));
        }

        // an empty string counts as omitted
        let priority = match input.priority.as_deref() {
            None | Some("") => Priority::default(),
            Some(priority) => parse_priority(priority)?,
        };

        let id = self.next_id().await;
        let now = Utc::now();
        let todo = Todo {
            id,
            title: input.title,
            description: input.description,
            completed: false,
            priority,
            due_date: input.due_date.unwrap_or_default(),
            tags: input.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    pub async fn toggle(&self, id: u64) -> Result<Todo> {
        let mut todos = self.todos.write().await;
        let todo = find_mut(&mut todos, id)?;
        todo.completed = !todo.completed;
        touch(todo);
        Ok(todo.clone())
    }

    /// Applies every field present in `patch`. A rejected patch leaves the
    /// todo untouched.
    pub async fn update(&self, id: u64, patch: TodoPatch) -> Result<Todo> {
        if patch.title.as_deref() == Some("") {
            return Err(Error::validation("Title cannot be empty"));
        }
        if patch.description.as_deref() == Some("") {
            return Err(Error::validation("Description cannot be empty"));
        }
        let priority = patch.priority.as_deref().map(parse_priority).transpose()?;

        let mut todos = self.todos.write().await;
        let todo = find_mut(&mut todos, id)?;

        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(description) = patch.description {
            todo.description = description;
        }
        if let Some(priority) = priority {
            todo.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            todo.due_date = due_date;
        }
        if let Some(tags) = patch.tags {
            todo.tags = tags;
        }
        touch(todo);

        Ok(todo.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<Todo> {
        let mut todos = self.todos.write().await;
        let index = todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(Error::NotFound(id))?;
        Ok(todos.remove(index))
    }

    /// Case-insensitive substring search over title and description. An
    /// empty query matches nothing.
    pub async fn search(&self, query: &str) -> Vec<Todo> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let todos = self.todos.read().await;
        todos
            .iter()
            .filter(|todo| todo.matches(&query))
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> Stats {
        let now = Utc::now();
        let todos = self.todos.read().await;

        let mut stats = Stats {
            total: todos.len(),
            ..Stats::default()
        };

        for todo in todos.iter() {
            if todo.completed {
                stats.completed += 1;
            } else {
                stats.active += 1;
            }
            if todo.priority == Priority::High {
                stats.high_priority += 1;
            }
            if todo.is_overdue(now) {
                stats.overdue += 1;
            }
            stats.by_priority.bump(todo.priority);
        }

        stats
    }

    /// Installs the example todos shown on a fresh start.
    pub async fn seed(&self) {
        let now = Utc::now();
        let samples = [
            Sample {
                title: "Welcome to Enhanced TODO",
                description: "This app now has priority levels, due dates, tags, and search!",
                completed: false,
                priority: Priority::High,
                due: now + Duration::days(1),
                tags: &["important", "demo"],
                created_at: now,
            },
            Sample {
                title: "Learn Go Backend",
                description: "Complete the RESTful API with advanced features",
                completed: false,
                priority: Priority::Medium,
                due: now + Duration::days(3),
                tags: &["learning", "backend"],
                created_at: now,
            },
            Sample {
                title: "Master Svelte Frontend",
                description: "Build an interactive UI with filters and search",
                completed: true,
                priority: Priority::Low,
                due: now - Duration::days(1),
                tags: &["learning", "frontend"],
                created_at: now - Duration::hours(48),
            },
        ];

        let mut seeded = Vec::with_capacity(samples.len());
        for sample in samples {
            seeded.push(Todo {
                id: self.next_id().await,
                title: sample.title.into(),
                description: sample.description.into(),
                completed: sample.completed,
                priority: sample.priority,
                due_date: sample.due.to_rfc3339(),
                tags: sample.tags.iter().map(|tag| tag.to_string()).collect(),
                created_at: sample.created_at,
                updated_at: now,
            });
        }

        self.todos.write().await.extend(seeded);
    }
}

struct Sample {
    title: &'static str,
    description: &'static str,
    completed: bool,
    priority: Priority,
    due: DateTime<Utc>,
    tags: &'static [&'static str],
    created_at: DateTime<Utc>,
}

fn parse_priority(priority: &str) -> Result<Priority> {
    priority
        .parse()
        .map_err(|_| Error::validation(PRIORITY_MESSAGE))
}

fn find_mut(todos: &mut [Todo], id: u64) -> Result<&mut Todo> {
    todos
        .iter_mut()
        .find(|todo| todo.id == id)
        .ok_or(Error::NotFound(id))
}

// never moves backwards, even if the wall clock does
fn touch(todo: &mut Todo) {
    todo.updated_at = Utc::now().max(todo.updated_at);
}
