use api::auth::Flash;
use api::Profile;

use super::Page;

/// Profile page: the account and every feedback entry it owns.
pub fn user_detail(flashes: Vec<Flash>, profile: Profile) -> Page {
    let mut page = Page::new("user_detail", flashes);
    page.heading = Some(profile.user.full_name());
    page.user = Some(profile.user);
    page.feedback = Some(profile.feedback);
    page
}
