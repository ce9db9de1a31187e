//! Page-name registry for the UI shell.
//!
//! The UI registers each page once under a unique name and navigates by
//! name. Registration and navigation mistakes (blank names, duplicates,
//! unknown names) are caller bugs and fail loudly with
//! [`CollectionError::Validation`] rather than silently no-opping.

use std::sync::RwLock;

use crate::error::{CollectionError, Result};

#[derive(Debug)]
struct NavigatorState<P> {
    pages: Vec<(String, P)>,
    current: Option<String>,
    back_stack: Vec<String>,
}

impl<P> Default for NavigatorState<P> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            current: None,
            back_stack: Vec::new(),
        }
    }
}

/// Name-to-page registry with a back stack.
///
/// `P` is whatever the UI layer navigates to: a page enum, a view
/// constructor, a route. Values must be comparable so a page registered
/// under two names is caught at registration time.
#[derive(Debug)]
pub struct Navigator<P> {
    state: RwLock<NavigatorState<P>>,
}

impl<P> Default for Navigator<P> {
    fn default() -> Self {
        Self {
            state: RwLock::new(NavigatorState::default()),
        }
    }
}

impl<P: Clone + PartialEq> Navigator<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `page` under `name`. Each name and each page value may be
    /// registered exactly once.
    pub fn register(&self, name: &str, page: P) -> Result<()> {
        if name.trim().is_empty() {
            return Err(CollectionError::Validation(
                "a page name must be provided".to_owned(),
            ));
        }

        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

        if state.pages.iter().any(|(existing, _)| existing == name) {
            return Err(CollectionError::Validation(format!(
                "the page {name} has already been registered"
            )));
        }
        if state.pages.iter().any(|(_, existing)| *existing == page) {
            return Err(CollectionError::Validation(format!(
                "the page registered as {name} has already been registered under another name"
            )));
        }

        state.pages.push((name.to_owned(), page));
        Ok(())
    }

    /// Navigate to the page registered under `name`, pushing the previous
    /// page onto the back stack.
    pub fn navigate_to(&self, name: &str) -> Result<P> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

        let page = state
            .pages
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, page)| page.clone())
            .ok_or_else(|| {
                CollectionError::Validation(format!(
                    "unable to find a page registered with the name {name}"
                ))
            })?;

        if let Some(previous) = state.current.take() {
            state.back_stack.push(previous);
        }
        state.current = Some(name.to_owned());

        Ok(page)
    }

    /// Return to the previous page, if there is one. Staying put when the
    /// back stack is empty is not an error.
    pub fn go_back(&self) -> Option<P> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

        let name = state.back_stack.pop()?;
        let page = state
            .pages
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, page)| page.clone())?;

        state.current = Some(name);
        Some(page)
    }

    /// Name of the page currently navigated to.
    pub fn current_page(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .current
            .clone()
    }
}
