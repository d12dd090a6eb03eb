//! Leave request commands.

use deer_hub_core::LeaveType;
use deer_hub_portal::Command;
use deer_hub_portal::forms::FileSelection;
use deer_hub_portal::leave::LeaveForm;

use super::{CliError, CliPortal, Output};
use crate::LeaveArgs;

/// Fill in a leave form from command-line arguments.
///
/// # Errors
///
/// Returns an error if an attachment cannot be read or is refused.
pub fn build_form(args: &LeaveArgs) -> Result<LeaveForm, CliError> {
    let mut form = LeaveForm::new();
    match args.leave_type.parse::<LeaveType>() {
        Ok(leave_type) => form.select_leave_type(leave_type),
        // Left as typed so validation reports it
        Err(_) => form.leave_type.clone_from(&args.leave_type),
    }
    if let Some(priority) = &args.priority {
        form.priority.clone_from(priority);
    }
    form.start_date.clone_from(&args.start);
    form.end_date.clone_from(&args.end);
    form.set_reason(&args.reason);
    form.emergency_contact.clone_from(&args.emergency_contact);

    if !args.attachments.is_empty() {
        let files = args
            .attachments
            .iter()
            .map(|path| {
                FileSelection::from_path(path).map_err(|source| CliError::ReadFile {
                    path: path.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        form.attach(files).map_err(CliError::InvalidFiles)?;
    }

    if let Some(days) = form.duration() {
        tracing::debug!(days, "Leave duration");
    }
    if form.needs_emergency_contact() && form.emergency_contact.trim().is_empty() {
        tracing::warn!("Long leave without an emergency contact");
    }
    Ok(form)
}

/// Submit a leave request.
///
/// # Errors
///
/// Returns an error if the request is denied, invalid or cannot be saved.
pub async fn submit(portal: &mut CliPortal, out: &Output, form: LeaveForm) -> Result<(), CliError> {
    let outcome = portal.dispatch(Command::SubmitLeave(form)).await;
    out.outcome(&outcome)
}

/// Save the form as the leave draft.
///
/// # Errors
///
/// Returns an error if the draft cannot be saved.
pub async fn save_draft(
    portal: &mut CliPortal,
    out: &Output,
    form: LeaveForm,
) -> Result<(), CliError> {
    let outcome = portal.dispatch(Command::SaveLeaveDraft(form)).await;
    out.outcome(&outcome)
}

/// Print the saved draft.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn show_draft(portal: &CliPortal, out: &Output) -> Result<(), CliError> {
    let draft = portal.load_leave_draft();
    out.emit(&draft, |draft| match draft {
        Some(draft) => {
            println!("Type:     {}", draft.leave_type);
            println!("Priority: {}", draft.priority);
            println!("Dates:    {} to {}", draft.start_date, draft.end_date);
            println!("Reason:   {}", draft.reason);
            if !draft.emergency_contact.is_empty() {
                println!("Contact:  {}", draft.emergency_contact);
            }
        }
        None => println!("No saved draft"),
    })
}

/// Print leave requests, newest first.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn recent(portal: &CliPortal, out: &Output, all: bool) -> Result<(), CliError> {
    let requests = if all {
        portal.leave_requests()
    } else {
        portal.recent_leave_requests()
    };

    out.emit(&requests, |requests| {
        if requests.is_empty() {
            println!("No leave requests");
        }
        for request in requests {
            println!(
                "{} {} {} to {} ({}) [{}]",
                request.id,
                request.leave_type,
                request.start_date,
                request.end_date,
                request.duration_label(),
                request.status
            );
        }
    })
}

/// Print the leave balances.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn balance(portal: &CliPortal, out: &Output) -> Result<(), CliError> {
    out.emit(portal.leave_balances(), |balances| {
        for balance in balances {
            println!(
                "{:<10} {:>2} of {:>2} days left",
                balance.leave_type.as_str(),
                balance.remaining(),
                balance.total
            );
        }
    })
}
