use crossterm::event::KeyCode;

/// One option of the wrapped control
#[derive(Debug, Clone)]
pub struct NativeOption {
    /// Form value submitted for this option
    pub value: String,
    /// Display label
    pub label: String,
    /// Class tokens, each rendered as an icon marker before the label
    pub classes: Vec<String>,
    /// Group label, when the option belongs to a named group
    pub group: Option<String>,
    pub selected: bool,
    pub disabled: bool,
}

impl NativeOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            classes: Vec::new(),
            group: None,
            selected: false,
            disabled: false,
        }
    }

    /// Set class tokens from a whitespace-separated attribute string
    pub fn classes(mut self, attr: &str) -> Self {
        self.classes = attr.split_whitespace().map(str::to_string).collect();
        self
    }

    pub fn group(mut self, label: impl Into<String>) -> Self {
        self.group = Some(label.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// The wrapped single-select form control
///
/// Remains the source of truth for selection and submitted value; the widget
/// mirrors it into the synthetic list and writes selection changes back to
/// it. Keyboard selection semantics (arrows moving over enabled options)
/// live here, not in the widget.
#[derive(Debug, Clone, Default)]
pub struct NativeSelect {
    id: Option<String>,
    options: Vec<NativeOption>,
    disabled: bool,
}

impl NativeSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn option(mut self, option: NativeOption) -> Self {
        self.options.push(option);
        self
    }

    /// Append a plain option with no group, classes or flags
    pub fn opt(self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.option(NativeOption::new(value, label))
    }

    /// Append an option in place. Used when the control is mutated after a
    /// widget wrapped it; follow up with a widget `sync()`.
    pub fn push_option(&mut self, option: NativeOption) {
        self.options.push(option);
    }

    pub fn options(&self) -> &[NativeOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Index of the first option whose selected flag is set
    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.selected)
    }

    /// Move the selection; any previously flagged option is cleared.
    /// Out-of-range indices leave the control untouched.
    pub fn set_selected_index(&mut self, index: usize) {
        if index >= self.options.len() {
            return;
        }
        for (i, option) in self.options.iter_mut().enumerate() {
            option.selected = i == index;
        }
    }

    /// Value string of the selected option; empty when nothing is selected
    pub fn value(&self) -> &str {
        self.selected_index()
            .map(|i| self.options[i].value.as_str())
            .unwrap_or("")
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Native keyboard selection: arrows move over enabled options,
    /// Home/End jump to the ends, no wrap-around.
    ///
    /// Returns true when the selection moved.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.disabled || self.options.is_empty() {
            return false;
        }

        let current = self.selected_index();
        let target = match key {
            KeyCode::Up => match current {
                Some(i) => self.prev_enabled(i),
                None => self.first_enabled(),
            },
            KeyCode::Down => match current {
                Some(i) => self.next_enabled(i),
                None => self.first_enabled(),
            },
            KeyCode::Home => self.first_enabled(),
            KeyCode::End => self.last_enabled(),
            _ => return false,
        };

        match target {
            Some(i) if Some(i) != current => {
                self.set_selected_index(i);
                true
            }
            _ => false,
        }
    }

    fn first_enabled(&self) -> Option<usize> {
        self.options.iter().position(|o| !o.disabled)
    }

    fn last_enabled(&self) -> Option<usize> {
        self.options.iter().rposition(|o| !o.disabled)
    }

    fn prev_enabled(&self, from: usize) -> Option<usize> {
        self.options[..from].iter().rposition(|o| !o.disabled)
    }

    fn next_enabled(&self, from: usize) -> Option<usize> {
        self.options[from + 1..]
            .iter()
            .position(|o| !o.disabled)
            .map(|i| from + 1 + i)
    }
}
