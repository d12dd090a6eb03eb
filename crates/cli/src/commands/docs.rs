//! Document upload and library commands.

use deer_hub_core::{Document, DocumentId};
use deer_hub_portal::Command;
use deer_hub_portal::forms::FileSelection;
use deer_hub_portal::upload::{DocumentCard, UploadForm, ViewMode};

use super::{CliError, CliPortal, Output};
use crate::UploadArgs;

/// Fill in the upload form from command-line arguments.
///
/// Files that break the size or type rules are dropped with a warning, the
/// rest stay selected.
///
/// # Errors
///
/// Returns an error if a file cannot be read.
pub fn build_form(args: UploadArgs) -> Result<UploadForm, CliError> {
    let files = args
        .files
        .iter()
        .map(|path| {
            FileSelection::from_path(path).map_err(|source| CliError::ReadFile {
                path: path.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut form = UploadForm {
        title: args.title,
        category: args.category,
        description: args.description,
        access_level: args.access_level,
        tags: args.tags,
        version_control: args.version_control,
        ..UploadForm::new()
    };
    for violation in form.files.add(files) {
        tracing::warn!(%violation, "File dropped from upload");
        eprintln!("[error] {violation}");
    }
    Ok(form)
}

/// Upload the selected files.
///
/// # Errors
///
/// Returns an error if the upload is denied, invalid or cannot be saved.
pub async fn upload(
    portal: &mut CliPortal,
    out: &Output,
    form: UploadForm,
) -> Result<(), CliError> {
    tracing::info!(
        files = form.files.len(),
        bytes = form.files.total_size(),
        "Uploading"
    );
    let outcome = portal.dispatch(Command::Upload(form)).await;
    out.outcome(&outcome)
}

fn print_documents(documents: &[Document], view: ViewMode) {
    if documents.is_empty() {
        println!("No documents");
        return;
    }
    for doc in documents {
        let card = DocumentCard::from(doc);
        match view {
            ViewMode::Grid => {
                println!("[{}] {} ({})", card.id, card.title, card.icon);
                println!("    {} | {} | {}", card.file_name, card.size, card.uploaded);
                if !card.tags.is_empty() {
                    println!("    tags: {}", card.tags.join(", "));
                }
            }
            ViewMode::List => println!(
                "{:<14} {:<30} {:<12} {:>10} {}",
                card.id, card.title, card.category, card.size, card.uploaded
            ),
        }
    }
}

/// Print the whole library.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub async fn list(portal: &mut CliPortal, out: &Output, view: ViewMode) -> Result<(), CliError> {
    portal.dispatch(Command::SetViewMode(view)).await;
    let documents = portal.documents();
    let view = portal.view_mode();
    out.emit(&documents, |documents| print_documents(documents, view))
}

/// Print library documents matching `query`.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn search(portal: &CliPortal, out: &Output, query: &str) -> Result<(), CliError> {
    let documents = portal.search_documents(query);
    out.emit(&documents, |documents| {
        print_documents(documents, portal.view_mode());
    })
}

/// Print the most recent uploads.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn recent(portal: &CliPortal, out: &Output) -> Result<(), CliError> {
    let documents = portal.recent_documents();
    out.emit(&documents, |documents| {
        print_documents(documents, ViewMode::List);
    })
}

/// Download a document.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub async fn download(
    portal: &mut CliPortal,
    out: &Output,
    id: DocumentId,
) -> Result<(), CliError> {
    let outcome = portal.dispatch(Command::DownloadDocument(id)).await;
    out.outcome(&outcome)
}

/// Open a document in the viewer.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub async fn view(portal: &mut CliPortal, out: &Output, id: DocumentId) -> Result<(), CliError> {
    let outcome = portal.dispatch(Command::ViewDocument(id)).await;
    out.outcome(&outcome)
}
