//! Screen stack modeled as explicit transitions.
//!
//! The filter core never looks at navigation state; front-ends react to the
//! [`Transition`] values returned here (for instance, refreshing the active
//! filter summary when a category screen is dismissed).

use std::fmt;

use crate::domain::FilterCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    FilterHub,
    FilterCategory(FilterCategory),
    LocationSearch,
}

impl Screen {
    pub fn is_modal(&self) -> bool {
        matches!(
            self,
            Screen::FilterHub | Screen::FilterCategory(_) | Screen::LocationSearch
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Home => f.write_str("home"),
            Screen::FilterHub => f.write_str("filters"),
            Screen::FilterCategory(category) => write!(f, "filters/{}", category.slug()),
            Screen::LocationSearch => f.write_str("location"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Presented(Screen),
    /// `revealed` is the screen that regains focus.
    Dismissed { closed: Screen, revealed: Screen },
    /// Dismiss was requested on the root screen.
    AtRoot,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Screen::Home)
    }
}

impl Navigator {
    pub fn new(root: Screen) -> Self {
        Self { stack: vec![root] }
    }

    pub fn present(&mut self, screen: Screen) -> Transition {
        self.stack.push(screen.clone());
        Transition::Presented(screen)
    }

    /// Pops the top screen. The root screen is never popped.
    pub fn dismiss(&mut self) -> Transition {
        if self.stack.len() <= 1 {
            return Transition::AtRoot;
        }
        match self.stack.pop() {
            Some(closed) => Transition::Dismissed {
                closed,
                revealed: self.current().clone(),
            },
            None => Transition::AtRoot,
        }
    }

    pub fn current(&self) -> &Screen {
        // The stack always holds the root.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Category of the top screen when it is a filter list.
    pub fn current_category(&self) -> Option<FilterCategory> {
        match self.current() {
            Screen::FilterCategory(category) => Some(*category),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        self.stack
            .iter()
            .map(|screen| screen.to_string())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}
