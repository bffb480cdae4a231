//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Each command calls into the record store and renders the result, either
//! as plain text or as JSON.

use hearth_core::{Event, HearthError, RecordStore, SupportRequest};
use serde::Serialize;
use std::io::Write;

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn emit(out: &mut dyn Write, text: &str) -> Result<(), HearthError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| HearthError::Output(e.to_string()))
}

fn emit_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<(), HearthError> {
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|e| HearthError::Serialization(e.to_string()))?;
    text.push('\n');
    emit(out, &text)
}

fn event_line(event: &Event) -> String {
    let date = if event.date.is_empty() {
        "(no date)"
    } else {
        event.date.as_str()
    };
    match &event.stream_link {
        Some(link) => format!("#{:<4} {:<10}  {}  <{}>\n", event.id.0, date, event.title, link),
        None => format!("#{:<4} {:<10}  {}\n", event.id.0, date, event.title),
    }
}

fn support_line(request: &SupportRequest) -> String {
    let assigned = request
        .assigned_volunteer_id
        .map(|id| format!("volunteer {}", id))
        .unwrap_or_else(|| "unassigned".to_string());
    format!(
        "#{:<4} {}  [{}] {} ({}): {} - {}\n",
        request.id.0,
        request.date,
        request.status.as_str(),
        request.member_name,
        request.contact,
        request.description,
        assigned
    )
}

// =============================================================================
// EVENTS COMMAND
// =============================================================================

/// List events in display order, or creation order when `created` is set.
pub fn cmd_events(
    store: &RecordStore,
    out: &mut dyn Write,
    json_mode: bool,
    created: bool,
) -> Result<(), HearthError> {
    let events = if created {
        store.list_events()
    } else {
        store.ordered_events()
    };

    if json_mode {
        return emit_json(out, &events);
    }

    if events.is_empty() {
        return emit(out, "No events scheduled.\n");
    }

    let mut text = String::from("Events\n======\n");
    for event in &events {
        text.push_str(&event_line(event));
    }
    emit(out, &text)
}

// =============================================================================
// ADD EVENT COMMAND
// =============================================================================

/// Create an event.
pub fn cmd_add_event(
    store: &RecordStore,
    out: &mut dyn Write,
    json_mode: bool,
    title: &str,
    date: &str,
    stream_link: &str,
) -> Result<(), HearthError> {
    let event = store.create_event(title, date, stream_link)?;

    if json_mode {
        return emit_json(out, &event);
    }
    emit(out, &format!("Created event {}\n{}", event.id, event_line(&event)))
}

// =============================================================================
// SUPPORT COMMANDS
// =============================================================================

/// Create a technical-support request.
pub fn cmd_request_support(
    store: &RecordStore,
    out: &mut dyn Write,
    json_mode: bool,
    name: &str,
    contact: &str,
    description: &str,
) -> Result<(), HearthError> {
    let request = store.create_support_request(name, contact, description)?;

    if json_mode {
        return emit_json(out, &request);
    }
    emit(
        out,
        &format!(
            "Created support request {}\n{}",
            request.id,
            support_line(&request)
        ),
    )
}

/// List support requests in creation order.
pub fn cmd_supports(
    store: &RecordStore,
    out: &mut dyn Write,
    json_mode: bool,
) -> Result<(), HearthError> {
    let requests = store.list_support_requests();

    if json_mode {
        return emit_json(out, &requests);
    }

    if requests.is_empty() {
        return emit(out, "No support requests.\n");
    }

    let mut text = String::from("Support Requests\n================\n");
    for request in &requests {
        text.push_str(&support_line(request));
    }
    emit(out, &text)
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Counters and collection sizes of the dataset.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub data_file: String,
    pub events: usize,
    pub supports: usize,
    pub volunteers: usize,
    pub next_event_id: u64,
    pub next_support_id: u64,
}

impl StatusReport {
    pub fn from_store(store: &RecordStore) -> Self {
        let dataset = store.snapshot();
        Self {
            data_file: store.path().display().to_string(),
            events: dataset.events.len(),
            supports: dataset.supports.len(),
            volunteers: dataset.volunteers.len(),
            next_event_id: dataset.next_event_id,
            next_support_id: dataset.next_support_id,
        }
    }
}

/// Show dataset status.
pub fn cmd_status(
    store: &RecordStore,
    out: &mut dyn Write,
    json_mode: bool,
) -> Result<(), HearthError> {
    let report = StatusReport::from_store(store);

    if json_mode {
        return emit_json(out, &report);
    }

    let text = format!(
        "Hearth Status\n=============\n\
         Data file:        {}\n\
         Events:           {}\n\
         Support requests: {}\n\
         Volunteers:       {}\n\
         Next event id:    {}\n\
         Next support id:  {}\n",
        report.data_file,
        report.events,
        report.supports,
        report.volunteers,
        report.next_event_id,
        report.next_support_id
    );
    emit(out, &text)
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Make sure the data file exists on disk.
pub fn cmd_init(
    store: &RecordStore,
    out: &mut dyn Write,
    json_mode: bool,
) -> Result<(), HearthError> {
    store.save()?;

    if json_mode {
        return emit_json(out, &StatusReport::from_store(store));
    }
    emit(
        out,
        &format!("Initialized data file {}\n", store.path().display()),
    )
}
