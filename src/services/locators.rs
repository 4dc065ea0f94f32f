//! Structural identifiers used to drive the portal UI.
//!
//! Everything the automation targets on the remote pages lives in this one
//! table so that a portal markup change is a data update, not a code change.
//! Selector strings are CSS; `*_text` entries are matched against rendered
//! element text.

/// Locator table for the fixed target portal.
#[derive(Debug, Clone)]
pub struct Locators {
    // Login screen
    pub username_label: &'static str,
    pub password_label: &'static str,
    pub login_button: &'static str,
    pub login_button_text: &'static str,
    /// Element whose appearance confirms a logged-in landing page.
    pub post_login_marker: &'static str,

    // Landing page directory
    pub sport_card: &'static str,
    pub card_header: &'static str,
    /// Present only on cards that represent a sport with a roster.
    pub roster_link: &'static str,
    pub card_primary_action: &'static str,

    // Schedule page
    pub schedule_table: &'static str,
    pub schedule_row: &'static str,
    pub row_cell: &'static str,
    pub row_edit_link: &'static str,

    // Result entry screens
    pub results_nav: &'static str,
    pub results_nav_link: &'static str,
    pub results_nav_text: &'static str,
    pub race_section: &'static str,
    pub race_heading: &'static str,
    pub lane_card: &'static str,
    pub swimmer_input: &'static str,
    pub time_input: &'static str,
    pub place_input: &'static str,
    pub save_button: &'static str,
    pub save_button_text: &'static str,
}

impl Default for Locators {
    fn default() -> Self {
        Self {
            username_label: "Username",
            password_label: "Password",
            login_button: "button",
            login_button_text: "Login",
            post_login_marker: ".card",

            sport_card: ".card",
            card_header: ".card-header strong",
            roster_link: r#"a[href^="/Teams/"]"#,
            card_primary_action: "a.btn-primary",

            schedule_table: "table.table",
            schedule_row: "table.table tbody tr",
            row_cell: "td",
            row_edit_link: "a.btn-default",

            results_nav: "ul.nav",
            results_nav_link: "ul.nav a.nav-link",
            results_nav_text: "Event Results",
            race_section: ".mb-3",
            race_heading: "h3",
            lane_card: ".card.event-scoring.mb-2",
            swimmer_input: r#".autocomplete input[type="text"]"#,
            time_input: r#".input-number-mid input[type="text"]"#,
            place_input: r#".input-number input[type="text"]"#,
            save_button: "button",
            save_button_text: "Save",
        }
    }
}
