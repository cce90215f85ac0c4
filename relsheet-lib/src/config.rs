//! Grid configuration

use serde::Deserialize;
use serde::Serialize;

use crate::model::ColumnDescriptor;
use crate::model::ColumnType;
use crate::model::DEFAULT_COLUMN_WIDTH;

/// Tunable behavior of the grid.
///
/// Every field has a default, so a config file only needs the fields it changes.
///
/// # Example
///
/// ```
/// use relsheet_lib::GridConfig;
///
/// let config = GridConfig::default()
///     .with_width_range(60, 480)
///     .with_zebra_striping(false);
/// assert_eq!(config.clamp_width(1000), 480);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Width of newly created columns.
    ///
    /// Default: 160
    pub default_column_width: u16,

    /// Narrowest width a column can be resized to.
    ///
    /// Default: 48
    pub min_column_width: u16,

    /// Widest width a column can be resized to.
    ///
    /// Default: 800
    pub max_column_width: u16,

    /// Shade every other row.
    ///
    /// Default: true
    pub zebra_striping: bool,

    /// Label shown for a choice or reference id missing from the option set.
    ///
    /// Default: "Unknown"
    pub unknown_option_label: String,

    /// Label given to columns inserted from the context menu.
    ///
    /// Default: "New Column"
    pub new_column_label: String,

    /// Column shown by the settings panel when no column has been focused yet.
    pub settings_fallback: ColumnDescriptor,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: 48,
            max_column_width: 800,
            zebra_striping: true,
            unknown_option_label: "Unknown".to_string(),
            new_column_label: "New Column".to_string(),
            settings_fallback: ColumnDescriptor::new("sample", "Sample Column", ColumnType::Text),
        }
    }
}

impl GridConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width of new columns.
    pub fn with_default_column_width(mut self, width: u16) -> Self {
        self.default_column_width = width;
        self
    }

    /// Sets the resize range. The bounds are swapped if given in the wrong order.
    pub fn with_width_range(mut self, min: u16, max: u16) -> Self {
        self.min_column_width = min.min(max);
        self.max_column_width = min.max(max);
        self
    }

    /// Enables or disables zebra striping.
    pub fn with_zebra_striping(mut self, enabled: bool) -> Self {
        self.zebra_striping = enabled;
        self
    }

    /// Sets the label shown for unresolvable option ids.
    pub fn with_unknown_option_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_option_label = label.into();
        self
    }

    /// Sets the label of columns inserted from the context menu.
    pub fn with_new_column_label(mut self, label: impl Into<String>) -> Self {
        self.new_column_label = label.into();
        self
    }

    /// Sets the settings panel fallback column.
    pub fn with_settings_fallback(mut self, column: ColumnDescriptor) -> Self {
        self.settings_fallback = column;
        self
    }

    /// Clamps a requested column width to the configured range.
    pub fn clamp_width(&self, width: u16) -> u16 {
        let min = self.min_column_width.min(self.max_column_width);
        let max = self.min_column_width.max(self.max_column_width);
        width.clamp(min, max)
    }
}
