//! Client constants.
//!
//! Centralizes magic numbers, defaults and user-facing text.

/// Backend connection defaults.
pub mod backend {
    /// Base URL used when `FLAMORE_API_URL` is not set.
    pub const DEFAULT_BASE_URL: &str = "http://192.168.0.178:3000";

    /// Club new registrations join when `FLAMORE_CLUB_ID` is not set.
    pub const DEFAULT_CLUB_ID: i64 = 1;
}

/// Derived view constants.
pub mod views {
    /// Items shown before "show more" is expanded, on every list that pages.
    pub const PAGE_LIMIT: usize = 4;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for completed requests waiting to be applied.
    pub const CHANNEL_BUFFER_SIZE: usize = 10;
}

/// User-facing text.
pub mod text {
    /// Shown when a request could not even be built.
    pub const INVALID_REQUEST: &str = "Érvénytelen kérés.";
    /// Shown when the server could not be reached.
    pub const NETWORK_ERROR: &str = "Hálózati hiba: a szerver nem érhető el.";
    /// Prefix for server errors without a message of their own.
    pub const SERVER_ERROR: &str = "Szerver hiba történt";
    /// Shown when a response could not be processed.
    pub const DECODE_ERROR: &str = "Hiba az adatok feldolgozása során.";
    /// Confirmation after a successful registration.
    pub const REGISTRATION_OK: &str = "Sikeres regisztráció! Most már bejelentkezhetsz.";

    /// Placeholder for an unparsable start time.
    pub const NO_TIME: &str = "Nincs időpont";
    /// Placeholder for an unparsable start day.
    pub const NO_DAY: &str = "Nincs nap";

    /// Label of the "all" filter chip.
    pub const FILTER_ALL: &str = "Összes";
    /// Toggle label while the training list is collapsed.
    pub const SHOW_MORE: &str = "További edzések";
    /// Expander label under the collapsed news list.
    pub const SHOW_MORE_NEWS: &str = "Több hír mutatása";
    /// Toggle label while a list is expanded.
    pub const SHOW_LESS: &str = "Bezárás";
}
