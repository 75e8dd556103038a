//! The render / submit cycle of a page against a state store.
//!
//! A host wires these into its GET and POST handlers. Next-page resolution is
//! left to the host: a successful submission returns the saved update.

use tracing::debug;

use crate::{
    Page,
    config::RequestConfig,
    error::Error,
    validation::Errors,
    value::{FormData, State},
    view::PageViewModel,
};

/// Where a page reads and writes its state.
pub trait StateStore {
    /// The current state.
    fn get_data(&self) -> Result<State, Error>;

    /// Merge an update. Returns errors when the store rejects the update; these
    /// are shown to the user exactly like validation errors.
    fn set_data(&mut self, update: &State) -> Result<Option<Errors>, Error>;
}

/// Result of a submission.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Redisplay the page with errors.
    Render(PageViewModel),
    /// The update was stored.
    Saved(State),
}

/// Business-rule check applied to the merged state before it is stored.
pub type StateCheck = Box<dyn Fn(&State) -> Option<Errors>>;

/// A store holding state in memory.
#[derive(Default)]
pub struct MemoryStore {
    /// Current state.
    state: State,
    /// Optional check run before each update is merged.
    check: Option<StateCheck>,
}

impl MemoryStore {
    /// A store seeded with `state`.
    pub fn new(state: State) -> Self {
        Self { state, check: None }
    }

    /// Reject updates whose merged state fails `check`.
    pub fn with_check(mut self, check: impl Fn(&State) -> Option<Errors> + 'static) -> Self {
        self.check = Some(Box::new(check));
        self
    }

    /// The current state.
    pub fn state(&self) -> &State {
        &self.state
    }
}

impl StateStore for MemoryStore {
    fn get_data(&self) -> Result<State, Error> {
        Ok(self.state.clone())
    }

    fn set_data(&mut self, update: &State) -> Result<Option<Errors>, Error> {
        let mut merged = self.state.clone();
        merged.extend(update.iter().map(|(k, v)| (k.clone(), v.clone())));
        if let Some(errors) = self.check.as_ref().and_then(|check| check(&merged)) {
            return Ok(Some(errors));
        }
        self.state = merged;
        Ok(None)
    }
}

/// Render a page from stored state.
pub fn handle_get(
    page: &Page,
    config: &RequestConfig,
    store: &dyn StateStore,
) -> Result<PageViewModel, Error> {
    let state = store.get_data()?;
    let form_data = page.form_data_from_state(&state);
    Ok(page.view_model_with_config(config, &form_data, None))
}

/// Validate a submission and store the resulting update.
///
/// Any errors, from the form schema, the state schema or the store, redisplay
/// the page with the submitted values.
pub fn handle_post(
    page: &Page,
    config: &RequestConfig,
    store: &mut dyn StateStore,
    payload: &FormData,
) -> Result<Outcome, Error> {
    let form = page.validate_form_with_config(payload, config);
    if let Some(errors) = form.errors {
        debug!(errors = errors.len(), "submission rejected by form schema");
        return Ok(rerender(page, config, payload, &errors));
    }

    let update = page.state_from_valid_form(&form.value);
    let checked = page.validate_state_with_config(&update, config);
    if let Some(errors) = checked.errors {
        debug!(errors = errors.len(), "submission rejected by state schema");
        return Ok(rerender(page, config, payload, &errors));
    }

    if let Some(errors) = store.set_data(&checked.value)? {
        debug!(errors = errors.len(), "submission rejected by store");
        return Ok(rerender(page, config, payload, &errors));
    }

    debug!(keys = checked.value.len(), "submission saved");
    Ok(Outcome::Saved(checked.value))
}

fn rerender(page: &Page, config: &RequestConfig, payload: &FormData, errors: &Errors) -> Outcome {
    Outcome::Render(page.view_model_with_config(config, payload, Some(errors)))
}
