use crate::native::NativeSelect;

/// The value shown in the trigger: icon markers plus a text part
///
/// Kept structured so truncation can shorten the text while leaving the
/// markers untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayValue {
    pub icons: Vec<String>,
    pub text: String,
}

impl DisplayValue {
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty() && self.text.is_empty()
    }
}

/// One option of the synthetic list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Position among the control's options (group headers excluded),
    /// only valid until the next derivation
    pub index: usize,
    pub label: String,
    /// Class tokens rendered as markers before the label
    pub icons: Vec<String>,
    pub selected: bool,
    pub disabled: bool,
}

/// One row of the synthetic list, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    /// Emitted once per group, before its first member
    GroupHeader { label: String },
    Option(OptionEntry),
}

/// Read-only view of the control's options, rebuilt on every sync
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionList {
    rows: Vec<ListRow>,
}

impl OptionList {
    /// Derive the synthetic rows from the control's current options.
    ///
    /// Indices are recomputed from scratch; nothing is cached across
    /// structural changes to the control. The selected mark goes to the
    /// first non-disabled option whose flag is set; a disabled option is
    /// never marked even if the control flags it.
    pub fn derive(native: &NativeSelect) -> Self {
        let mut rows = Vec::new();
        let mut previous_group: Option<&str> = None;
        let mut have_selection = false;

        for (index, option) in native.options().iter().enumerate() {
            if let Some(group) = option.group.as_deref() {
                if previous_group != Some(group) {
                    rows.push(ListRow::GroupHeader {
                        label: group.to_string(),
                    });
                }
            }
            previous_group = option.group.as_deref();

            let selected = option.selected && !option.disabled && !have_selection;
            have_selection |= selected;

            rows.push(ListRow::Option(OptionEntry {
                index,
                label: option.label.clone(),
                icons: option.classes.clone(),
                selected,
                disabled: option.disabled,
            }));
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn option_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, ListRow::Option(_)))
            .count()
    }

    /// The entry for an option index
    pub fn entry(&self, index: usize) -> Option<&OptionEntry> {
        self.rows.iter().find_map(|row| match row {
            ListRow::Option(entry) if entry.index == index => Some(entry),
            _ => None,
        })
    }

    /// Row position of an option index, counting group headers
    pub fn row_of_index(&self, index: usize) -> Option<usize> {
        self.rows.iter().position(|row| {
            matches!(row, ListRow::Option(entry) if entry.index == index)
        })
    }

    /// The entry rendered at a row position, if that row is an option
    pub fn entry_at_row(&self, row: usize) -> Option<&OptionEntry> {
        match self.rows.get(row) {
            Some(ListRow::Option(entry)) => Some(entry),
            _ => None,
        }
    }

    pub fn selected_entry(&self) -> Option<&OptionEntry> {
        self.rows.iter().find_map(|row| match row {
            ListRow::Option(entry) if entry.selected => Some(entry),
            _ => None,
        })
    }

    /// Untruncated displayed value for the selected entry; empty when no
    /// option qualifies
    pub fn display_value(&self) -> DisplayValue {
        match self.selected_entry() {
            Some(entry) => DisplayValue {
                icons: entry.icons.clone(),
                text: entry.label.clone(),
            },
            None => DisplayValue::default(),
        }
    }

    /// Move the selected mark to `index`, clearing the previous mark.
    /// Used by selection jumps so a full re-derivation is not needed.
    pub fn mark_selected(&mut self, index: usize) {
        for row in &mut self.rows {
            if let ListRow::Option(entry) = row {
                entry.selected = entry.index == index;
            }
        }
    }
}
