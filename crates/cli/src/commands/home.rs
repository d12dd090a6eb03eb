//! Navigation and home page content.

use deer_hub_portal::Command;
use deer_hub_portal::chrome::{self, FEATURES};
use deer_hub_portal::pages::Page;
use deer_hub_portal::ticker::{self, AnnouncementDetail};

use super::{CliError, CliPortal, Output};

/// Open a page, following the access policy.
///
/// # Errors
///
/// Returns an error if the page is not available to the current session.
pub async fn visit(portal: &mut CliPortal, out: &Output, page: Page) -> Result<(), CliError> {
    let outcome = portal.dispatch(Command::Visit(page)).await;
    out.outcome(&outcome)
}

/// Activate a quick action card.
///
/// # Errors
///
/// Returns an error if no card with that title is shown or its page is denied.
pub async fn quick_action(
    portal: &mut CliPortal,
    out: &Output,
    title: String,
) -> Result<(), CliError> {
    let outcome = portal.dispatch(Command::QuickAction(title)).await;
    out.outcome(&outcome)
}

/// Print the announcements in ticker order.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn ticker(portal: &CliPortal, out: &Output) -> Result<(), CliError> {
    let ticker = portal.ticker();
    let details: Vec<AnnouncementDetail> = (0..ticker.announcements().len())
        .filter_map(|i| ticker.detail(i))
        .collect();

    out.emit(&details, |_| {
        println!(
            "Announcements (rotating every {}s):",
            ticker::ROTATION_INTERVAL.as_secs()
        );
        for announcement in ticker.announcements() {
            println!("{}", ticker::ticker_line(announcement));
        }
    })
}

/// Print the feature cards, or one feature with its benefits.
///
/// # Errors
///
/// Returns an error if `title` names no feature.
pub fn features(out: &Output, title: Option<&str>) -> Result<(), CliError> {
    let Some(title) = title else {
        return out.emit(FEATURES, |features| {
            for feature in features {
                println!("{} [{}]", feature.title, feature.category);
                println!("  {}", feature.description);
            }
        });
    };

    let detail =
        chrome::feature_detail(title).ok_or_else(|| CliError::UnknownFeature(title.to_owned()))?;
    out.emit(&detail, |detail| {
        println!("{}", detail.feature.title);
        println!("{}", detail.feature.description);
        for benefit in detail.benefits {
            println!("  - {benefit}");
        }
    })
}
