//! Cursor-paged remote queries behind the list commands.

use crate::QueryExecutor;
use async_trait::async_trait;
use derive_getters::Getters;
use lorebot_error::{LorebotResult, QueryError, QueryErrorKind};
use lorebot_paging::{CursorPaginationSession, Page, PageFetcher, PageFormatter};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tracing::{debug, instrument};

const ALL_LORE_CONNECTION: &str = r#"query GetAllLoreConnection($first: Int!, $after: String) {
  allLoreConnection(first: $first, after: $after) {
    edges {
      node {
        LORE_ID
        OBJECT_NAME
      }
      cursor
    }
    pageInfo {
      hasNextPage
      hasPreviousPage
      startCursor
      endCursor
    }
    totalCount
  }
}"#;

const ALL_PERSONS_CONNECTION: &str = r#"query GetAllPersons($first: Int, $after: String) {
  allPersonsConnection(first: $first, after: $after) {
    edges {
      node {
        PERSON_ID
        CHARNAME
        CREATE_DATE
      }
      cursor
    }
    pageInfo {
      hasNextPage
      hasPreviousPage
      startCursor
      endCursor
    }
    totalCount
  }
}"#;

const CHARACTER_INFO: &str = r#"query GetCharacterInfo($characterName: String!, $first: Int, $after: String) {
  characterInfo(characterName: $characterName, first: $first, after: $after) {
    edges {
      node {
        CHARACTER_ID
        CHARACTER_NAME
        LEVEL
        CLASS
        RACE
        ALIGNMENT
        EXPERIENCE
        GOLD
        BANK
        HITPOINTS
        MANA
        MOVEMENT
        STRENGTH
        INTELLIGENCE
        WISDOM
        DEXTERITY
        CONSTITUTION
        CHARISMA
        ARMOR_CLASS
        HITROLL
        DAMROLL
        SAVING_THROW
        LAST_LOGIN
        CREATED_DATE
      }
      cursor
    }
    pageInfo {
      hasNextPage
      hasPreviousPage
      startCursor
      endCursor
    }
    totalCount
  }
}"#;

/// Character stats listed by `who`, in display order.
const CHARACTER_STATS: &[(&str, &str)] = &[
    ("LEVEL", "Level"),
    ("CLASS", "Class"),
    ("RACE", "Race"),
    ("ALIGNMENT", "Alignment"),
    ("EXPERIENCE", "Experience"),
    ("GOLD", "Gold"),
    ("BANK", "Bank"),
    ("HITPOINTS", "HP"),
    ("MANA", "Mana"),
    ("MOVEMENT", "Movement"),
    ("STRENGTH", "STR"),
    ("INTELLIGENCE", "INT"),
    ("WISDOM", "WIS"),
    ("DEXTERITY", "DEX"),
    ("CONSTITUTION", "CON"),
    ("CHARISMA", "CHA"),
    ("ARMOR_CLASS", "AC"),
    ("HITROLL", "Hitroll"),
    ("DAMROLL", "Damroll"),
    ("SAVING_THROW", "Saving Throw"),
    ("LAST_LOGIN", "Last Login"),
    ("CREATED_DATE", "Created"),
];

/// Width of the first two name columns in `whoall`.
const NAME_COLUMN_WIDTH: usize = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection {
    #[serde(default)]
    edges: Vec<Edge>,
    page_info: PageInfo,
    #[serde(default)]
    total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    node: JsonValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    #[serde(default)]
    has_next_page: bool,
    #[serde(default)]
    has_previous_page: bool,
    #[serde(default)]
    end_cursor: Option<String>,
}

/// Read the connection under `field` of a query result as a [`Page`].
///
/// # Errors
///
/// Fails when the field is missing or null, or is not a connection.
///
/// # Examples
///
/// ```
/// use lorebot_social::parse_connection;
/// use serde_json::json;
///
/// let data = json!({"allLoreConnection": {
///     "edges": [{"node": {"OBJECT_NAME": "a ring"}, "cursor": "c1"}],
///     "pageInfo": {"hasNextPage": true, "hasPreviousPage": false, "endCursor": "c1"},
///     "totalCount": 12
/// }});
/// let page = parse_connection(&data, "allLoreConnection").unwrap();
/// assert_eq!(page.items().len(), 1);
/// assert_eq!(page.cursor().as_deref(), Some("c1"));
/// assert_eq!(page.total_count(), &Some(12));
/// ```
pub fn parse_connection(data: &JsonValue, field: &str) -> LorebotResult<Page> {
    let raw = match data.get(field) {
        Some(raw) if !raw.is_null() => raw.clone(),
        _ => return Err(QueryError::new(QueryErrorKind::MissingData(field.to_string())).into()),
    };
    let connection: Connection = serde_json::from_value(raw)
        .map_err(|e| QueryError::new(QueryErrorKind::Decode(format!("{field}: {e}"))))?;

    let page = Page::new(
        connection.edges.into_iter().map(|edge| edge.node).collect(),
        connection.page_info.end_cursor,
        connection.page_info.has_next_page,
        connection.page_info.has_previous_page,
    );
    Ok(match connection.total_count {
        Some(total) => page.with_total_count(total),
        None => page,
    })
}

/// Truthy in the loose sense the store's clients use: not null, false, zero
/// or empty.
fn is_present(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text_field<'a>(item: &'a JsonValue, field: &str) -> &'a str {
    item.get(field).and_then(JsonValue::as_str).unwrap_or_default()
}

/// `Xxxx` from any casing.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn format_lore_names(items: &[JsonValue]) -> String {
    items
        .iter()
        .map(|item| format!("Object '{}'", text_field(item, "OBJECT_NAME")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_character_columns(items: &[JsonValue]) -> String {
    let names: Vec<String> = items
        .iter()
        .map(|item| capitalize(text_field(item, "CHARNAME")))
        .collect();
    names
        .chunks(3)
        .map(|row| {
            let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or_default();
            format!(
                "{:<width$}{:<width$}{}",
                cell(0),
                cell(1),
                cell(2),
                width = NAME_COLUMN_WIDTH
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_character_info(items: &[JsonValue]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, character)| {
            let mut details = format!(
                "**{}. {}**\n",
                index + 1,
                text_field(character, "CHARACTER_NAME")
            );
            for (field, label) in CHARACTER_STATS {
                let Some(value) = character.get(*field).filter(|v| is_present(v)) else {
                    continue;
                };
                let mut shown = display_value(value);
                if field.ends_with("_LOGIN") || field.ends_with("_DATE") {
                    shown = shown.split('T').next().unwrap_or_default().to_string();
                }
                details.push_str(&format!("{label}: {shown}\n"));
            }
            details
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A cursor-paged query a list command runs, with how to present it.
///
/// Re-running the document with `after = <cursor>` yields the next page.
#[derive(Clone, Getters)]
pub struct ConnectionQuery {
    /// Command name.
    pub(crate) name: &'static str,
    /// GraphQL document.
    document: &'static str,
    /// Result field holding the connection.
    field: &'static str,
    /// Variables other than `first` and `after`.
    variables: Map<String, JsonValue>,
    /// Items per page.
    page_size: usize,
    /// Renders one page of nodes.
    #[getter(skip)]
    formatter: PageFormatter,
    /// Heading before the total count.
    heading: String,
    /// Reply when the first page is empty.
    empty_text: String,
    /// Reply when the query fails.
    error_text: String,
    /// Whether replies are shown only to the invoking user.
    private: bool,
}

fn page_size(limit: Option<i64>, default: usize, max: usize) -> usize {
    limit
        .and_then(|l| usize::try_from(l).ok())
        .unwrap_or(default)
        .clamp(1, max)
}

impl ConnectionQuery {
    /// `brief <item>`: lore object names.
    pub fn brief(item: impl Into<String>, limit: Option<i64>) -> Self {
        let item = item.into();
        Self {
            name: "brief",
            document: ALL_LORE_CONNECTION,
            field: "allLoreConnection",
            variables: Map::new(),
            page_size: page_size(limit, 10, 25),
            formatter: Arc::new(format_lore_names),
            heading: format!("Lore Items matching '{item}'"),
            empty_text: format!("No lore items found matching '{item}'."),
            error_text: format!("Error: Failed to fetch lore items for '{item}'. Please try again."),
            private: false,
        }
    }

    /// `whoall`: every known character, three names per row.
    pub fn whoall(limit: Option<i64>) -> Self {
        Self {
            name: "whoall",
            document: ALL_PERSONS_CONNECTION,
            field: "allPersonsConnection",
            variables: Map::new(),
            page_size: page_size(limit, 39, 42),
            formatter: Arc::new(format_character_columns),
            heading: "All characters".to_string(),
            empty_text: "No characters found.".to_string(),
            error_text: "Error: Failed to fetch character list. Please try again.".to_string(),
            private: true,
        }
    }

    /// `who <character>`: stats for characters matching the name.
    pub fn who(character: impl Into<String>, limit: Option<i64>) -> Self {
        let character = character.into();
        let mut variables = Map::new();
        variables.insert(
            "characterName".to_string(),
            JsonValue::String(character.clone()),
        );
        Self {
            name: "who",
            document: CHARACTER_INFO,
            field: "characterInfo",
            variables,
            page_size: page_size(limit, 10, 25),
            formatter: Arc::new(format_character_info),
            heading: format!("Character Information for '{character}'"),
            empty_text: format!("No character information found for '{character}'."),
            error_text: format!(
                "Error: Failed to fetch character information for '{character}'. Please try again."
            ),
            private: true,
        }
    }

    /// Variables for the page after `after`, or the first page.
    pub fn variables_after(&self, after: Option<&str>) -> JsonValue {
        let mut variables = self.variables.clone();
        variables.insert("first".to_string(), JsonValue::from(self.page_size));
        variables.insert(
            "after".to_string(),
            after.map_or(JsonValue::Null, |c| JsonValue::String(c.to_string())),
        );
        JsonValue::Object(variables)
    }

    /// Render a page of nodes.
    pub fn format(&self, items: &[JsonValue]) -> String {
        (self.formatter)(items)
    }

    fn title(&self, total: Option<u64>) -> String {
        match total {
            Some(total) => format!("{} ({} total)", self.heading, total),
            None => self.heading.clone(),
        }
    }

    /// Run the first page and wrap it in a session.
    ///
    /// Returns `Ok(None)` when there are no results.
    ///
    /// # Errors
    ///
    /// Fails if the first query fails or does not return a connection.
    #[instrument(skip(self, executor), fields(command = self.name))]
    pub async fn open(
        self,
        executor: Arc<dyn QueryExecutor>,
    ) -> LorebotResult<Option<CursorPaginationSession>> {
        let data = executor
            .execute(self.document, self.variables_after(None))
            .await?;
        let first = parse_connection(&data, self.field)?;
        if first.is_empty() {
            debug!("First page is empty");
            return Ok(None);
        }

        let title = self.title(*first.total_count());
        let page_size = self.page_size;
        let formatter = Arc::clone(&self.formatter);
        let fetcher = ConnectionFetcher::new(executor, self);

        CursorPaginationSession::builder()
            .fetcher(Arc::new(fetcher))
            .first_page(first)
            .formatter(formatter)
            .page_size(page_size)
            .title(title)
            .build()
            .map(Some)
    }
}

/// Fetches following pages by re-running a [`ConnectionQuery`].
pub struct ConnectionFetcher {
    executor: Arc<dyn QueryExecutor>,
    query: ConnectionQuery,
}

impl ConnectionFetcher {
    /// Fetch pages of `query` through `executor`.
    pub fn new(executor: Arc<dyn QueryExecutor>, query: ConnectionQuery) -> Self {
        Self { executor, query }
    }
}

#[async_trait]
impl PageFetcher for ConnectionFetcher {
    #[instrument(skip(self), fields(command = self.query.name))]
    async fn fetch_after(&self, cursor: &str) -> LorebotResult<Option<Page>> {
        let data = self
            .executor
            .execute(self.query.document, self.query.variables_after(Some(cursor)))
            .await?;
        parse_connection(&data, self.query.field).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_character_columns() {
        let items = vec![
            json!({"CHARNAME": "drunoob"}),
            json!({"CHARNAME": "TARLAN"}),
            json!({"CHARNAME": "ilse"}),
            json!({"CHARNAME": "bob"}),
        ];
        let text = format_character_columns(&items);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("{:<20}{:<20}Ilse", "Drunoob", "Tarlan"));
        assert_eq!(lines[1], format!("{:<40}", "Bob"));
    }

    #[test]
    fn test_character_info_skips_empty_stats() {
        let items = vec![json!({
            "CHARACTER_NAME": "Drunoob",
            "LEVEL": 30,
            "GOLD": 0,
            "RACE": null,
            "CLASS": "",
            "LAST_LOGIN": "2024-03-09T18:04:05Z"
        })];
        assert_eq!(
            format_character_info(&items),
            "**1. Drunoob**\nLevel: 30\nLast Login: 2024-03-09\n"
        );
    }

    #[test]
    fn test_page_size_defaults_and_clamps() {
        assert_eq!(page_size(None, 10, 25), 10);
        assert_eq!(page_size(Some(100), 10, 25), 25);
        assert_eq!(page_size(Some(-3), 10, 25), 10);
        assert_eq!(page_size(Some(0), 10, 25), 1);
    }

    #[test]
    fn test_variables_keep_command_arguments() {
        let query = ConnectionQuery::who("Drunoob", Some(5));
        let vars = query.variables_after(Some("c9"));
        assert_eq!(vars["characterName"], "Drunoob");
        assert_eq!(vars["first"], 5);
        assert_eq!(vars["after"], "c9");
        assert!(query.variables_after(None)["after"].is_null());
    }
}
