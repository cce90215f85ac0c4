//! Scripted event replay
//!
//! A script is a JSON array of steps, each tagged by `"step"`. Steps stand in
//! for what a rendering surface would send: clicks, key presses, editor
//! callbacks and menu choices.
//!
//! ```json
//! [
//!   { "step": "click", "row": 0, "col": 1, "kind": "double" },
//!   { "step": "draft", "value": "Ada" },
//!   { "step": "commit", "trigger": "enter" },
//!   { "step": "menu", "row": 0, "col": 1, "action": "duplicate_row" }
//! ]
//! ```

use relsheet_lib::Sheet;
use relsheet_lib::commands::ContextCommand;
use relsheet_lib::commands::ContextMenuTarget;
use relsheet_lib::commands::MenuAction;
use relsheet_lib::dispatch::Draft;
use relsheet_lib::grid::CellPos;
use relsheet_lib::grid::ClickKind;
use relsheet_lib::grid::CompletionTrigger;
use relsheet_lib::input::Anchor;
use relsheet_lib::input::KeyEvent;
use relsheet_lib::input::PointerEvent;
use relsheet_lib::model::ColumnType;
use relsheet_lib::model::types::OptionSet;
use relsheet_lib::source::TableSource;
use serde::Deserialize;

use crate::error::CliError;

fn default_trigger() -> CompletionTrigger {
    CompletionTrigger::Enter
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    Click {
        row: usize,
        col: usize,
        #[serde(default)]
        kind: ClickKind,
    },
    Header {
        col: usize,
    },
    HeaderDouble {
        col: usize,
    },
    Key(KeyEvent),
    Draft {
        value: Draft,
    },
    Commit {
        #[serde(default = "default_trigger")]
        trigger: CompletionTrigger,
    },
    Cancel,
    Escape,
    Command {
        command: ContextCommand,
    },
    Menu {
        #[serde(default)]
        row: Option<usize>,
        col: usize,
        action: MenuAction,
    },
    /// Opens the rename popover on `col`, types `label` and confirms.
    Rename {
        col: usize,
        label: String,
    },
    /// Opens the settings panel, overrides the given fields and saves.
    Settings {
        #[serde(default)]
        label: Option<String>,
        #[serde(default, rename = "type")]
        column_type: Option<ColumnType>,
        #[serde(default)]
        choices: Option<OptionSet>,
        #[serde(default)]
        formula: Option<String>,
    },
    Load {
        sheet: String,
    },
}

pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, CliError> {
    serde_json::from_str(json).map_err(|e| CliError::json("script", e))
}

impl ScriptStep {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptStep::Click { .. } => "click",
            ScriptStep::Header { .. } => "header",
            ScriptStep::HeaderDouble { .. } => "header_double",
            ScriptStep::Key(_) => "key",
            ScriptStep::Draft { .. } => "draft",
            ScriptStep::Commit { .. } => "commit",
            ScriptStep::Cancel => "cancel",
            ScriptStep::Escape => "escape",
            ScriptStep::Command { .. } => "command",
            ScriptStep::Menu { .. } => "menu",
            ScriptStep::Rename { .. } => "rename",
            ScriptStep::Settings { .. } => "settings",
            ScriptStep::Load { .. } => "load",
        }
    }

    /// Applies the step and describes what happened.
    pub async fn apply(&self, sheet: &mut Sheet, source: &dyn TableSource) -> String {
        match self {
            ScriptStep::Click { row, col, kind } => {
                let state = sheet.pointer(PointerEvent::Cell {
                    cell: CellPos::new(*row, *col),
                    kind: *kind,
                });
                state.to_string()
            }
            ScriptStep::Header { col } => sheet.pointer(PointerEvent::Header { col: *col }).to_string(),
            ScriptStep::HeaderDouble { col } => {
                let state = sheet.pointer(PointerEvent::HeaderDouble {
                    col: *col,
                    anchor: Anchor::default(),
                });
                format!("{}, rename open: {}", state, sheet.rename().is_open())
            }
            ScriptStep::Key(event) => format!("{:?} -> {}", sheet.key(*event), sheet.state()),
            ScriptStep::Draft { value } => match sheet.set_draft(value.clone()) {
                Some(id) => format!("draft set on session {}", id.0),
                None => "no active edit".to_string(),
            },
            ScriptStep::Commit { trigger } => match sheet.commit_active(*trigger) {
                Ok(outcome) => format!("{:?}", outcome),
                Err(err) => format!("rejected: {}", err),
            },
            ScriptStep::Cancel => match sheet.machine().session().map(|s| s.id) {
                Some(id) => format!("cancelled: {}", sheet.cancel_edit(id)),
                None => "no active edit".to_string(),
            },
            ScriptStep::Escape => format!("cleared: {}", sheet.escape()),
            ScriptStep::Command { command } => format!("{:?}", sheet.execute(command)),
            ScriptStep::Menu { row, col, action } => {
                let target = ContextMenuTarget { row: *row, col: *col };
                let offered = sheet.open_context_menu(target);
                if !offered.contains(action) {
                    sheet.close_context_menu();
                    return format!("'{}' not offered here", action.label());
                }
                format!("{:?}", sheet.menu_action(*action))
            }
            ScriptStep::Rename { col, label } => {
                if !sheet.rename_open(*col, Anchor::default()) {
                    return format!("column {} cannot be renamed", col);
                }
                sheet.rename_set_draft(label.clone());
                format!("{:?}", sheet.rename_commit())
            }
            ScriptStep::Settings {
                label,
                column_type,
                choices,
                formula,
            } => {
                sheet.settings_open();
                let Some(mut draft) = sheet.settings().draft().cloned() else {
                    return "settings panel did not open".to_string();
                };
                if let Some(label) = label {
                    draft.label = label.clone();
                }
                if let Some(column_type) = column_type {
                    draft.column_type = *column_type;
                }
                if let Some(choices) = choices {
                    if draft.column_type.is_reference() {
                        draft.reference_data = choices.clone();
                    } else {
                        draft.choices = choices.clone();
                    }
                }
                if formula.is_some() {
                    draft.formula = formula.clone();
                }
                sheet.settings_update(draft);
                format!("{:?}", sheet.settings_save())
            }
            ScriptStep::Load { sheet: name } => format!("{:?}", sheet.load_table(source, name).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relsheet_lib::GridConfig;
    use relsheet_lib::grid::MachineState;
    use relsheet_lib::input::Key;
    use relsheet_lib::source::InMemorySource;
    use relsheet_lib::source::SheetDocument;

    const DOCUMENT: &str = r#"{
        "sheets": [{
            "name": "people",
            "columns": [
                { "key": "name", "label": "Name", "type": "text" },
                { "key": "age", "label": "Age", "type": "integer" }
            ],
            "rows": [
                { "id": "r1", "name": "Ada", "age": 36 },
                { "id": "r2", "name": "Alan", "age": 41 }
            ]
        }]
    }"#;

    async fn loaded() -> (Sheet, InMemorySource) {
        let source = InMemorySource::from_document(SheetDocument::from_json(DOCUMENT).unwrap()).unwrap();
        let mut sheet = Sheet::new(GridConfig::default());
        sheet.load_table(&source, "people").await;
        (sheet, source)
    }

    #[test]
    fn test_parse_steps() {
        let steps = parse_script(
            r#"[
                { "step": "click", "row": 0, "col": 1 },
                { "step": "key", "key": "down" },
                { "step": "draft", "value": "x" },
                { "step": "commit" },
                { "step": "command", "command": { "command": "delete_row", "row": 0 } },
                { "step": "menu", "col": 1, "action": "rename_column" },
                { "step": "settings", "type": "choice", "choices": [{ "id": "a", "name": "A" }] }
            ]"#,
        )
        .unwrap();

        assert_eq!(steps.len(), 7);
        assert_eq!(
            steps[0],
            ScriptStep::Click {
                row: 0,
                col: 1,
                kind: ClickKind::Single
            }
        );
        assert_eq!(steps[1], ScriptStep::Key(KeyEvent::new(Key::Down)));
        assert_eq!(
            steps[3],
            ScriptStep::Commit {
                trigger: CompletionTrigger::Enter
            }
        );
        assert!(matches!(steps[5], ScriptStep::Menu { row: None, col: 1, .. }));
    }

    #[test]
    fn test_parse_unknown_step_fails() {
        assert!(parse_script(r#"[{ "step": "teleport" }]"#).is_err());
    }

    #[tokio::test]
    async fn test_replay_edit() {
        let (mut sheet, source) = loaded().await;
        let steps = parse_script(
            r#"[
                { "step": "click", "row": 1, "col": 2, "kind": "double" },
                { "step": "draft", "value": "42" },
                { "step": "commit", "trigger": "enter" },
                { "step": "key", "key": "up" }
            ]"#,
        )
        .unwrap();

        for step in &steps {
            step.apply(&mut sheet, &source).await;
        }

        let row = sheet.table().rows().get(1).unwrap();
        assert_eq!(row.value("age").to_text(), "42");
        assert_eq!(
            sheet.state(),
            MachineState::CellFocused {
                cell: CellPos::new(0, 2)
            }
        );
    }

    #[tokio::test]
    async fn test_replay_menu_not_offered() {
        let (mut sheet, source) = loaded().await;
        let step = ScriptStep::Menu {
            row: None,
            col: 1,
            action: MenuAction::DeleteRow,
        };
        let report = step.apply(&mut sheet, &source).await;
        assert!(report.contains("not offered"));
        assert_eq!(sheet.table().row_count(), 2);
        assert!(sheet.menu().is_none());
    }
}
