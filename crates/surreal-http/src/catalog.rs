//! Response templates, one per HTTP status the server emits.
//!
//! The table is built on first use and never written afterwards, so every
//! request handler reads it concurrently without locking. Callers copy an
//! entry into a [`ResponseBody`](crate::ResponseBody) before customising it.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Reference documentation linked from every response.
pub const DOCUMENTATION: &str = "https://docs.surreal.io/";

/// Template for the body sent with a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: u16,
    pub details: &'static str,
    pub documentation: &'static str,
    /// Default explanation; absent for server faults.
    pub information: Option<&'static str>,
}

const fn entry(code: u16, details: &'static str, information: &'static str) -> CatalogEntry {
    CatalogEntry {
        code,
        details,
        documentation: DOCUMENTATION,
        information: Some(information),
    }
}

/// The server-fault entry every unknown status falls back to.
pub const INTERNAL_ERROR: CatalogEntry = CatalogEntry {
    code: 500,
    details: "There was a problem with our servers, and we have been notified",
    documentation: DOCUMENTATION,
    information: None,
};

static FALLBACK: CatalogEntry = INTERNAL_ERROR;

const ENTRIES: [CatalogEntry; 12] = [
    entry(
        200,
        "Information",
        "Visit the documentation for details on accessing the api.",
    ),
    entry(
        400,
        "Request problems detected",
        "There is a problem with your request. Ensure that the request is valid.",
    ),
    entry(
        401,
        "Authentication failed",
        "Your authentication details are invalid. Reauthenticate using a valid token.",
    ),
    entry(
        403,
        "Request resource forbidden",
        "Your request was forbidden. Perhaps you don't have the necessary permissions to access this resource.",
    ),
    entry(
        404,
        "Request resource not found",
        "The requested resource does not exist. Check that you have entered the url correctly.",
    ),
    entry(
        405,
        "This method is not allowed",
        "The requested http method is not allowed for this resource. Refer to the documentation for allowed methods.",
    ),
    entry(
        409,
        "Request conflict detected",
        "The request could not be processed because of a conflict in the request.",
    ),
    entry(
        413,
        "Request content length too large",
        "All requests to the database must not exceed the predefined content length.",
    ),
    entry(
        415,
        "Unsupported content type requested",
        "The request needs to adhere to certain constraints. Check your request settings and try again.",
    ),
    entry(
        422,
        "Request problems detected",
        "There is a problem with your request. The request appears to contain invalid data.",
    ),
    entry(
        426,
        "Upgrade required",
        "There is a problem with your request. The request is expected to upgrade to a websocket connection.",
    ),
    INTERNAL_ERROR,
];

static CATALOG: LazyLock<HashMap<u16, CatalogEntry>> =
    LazyLock::new(|| ENTRIES.iter().map(|e| (e.code, *e)).collect());

/// Looks up the entry for `code`.
pub fn get(code: u16) -> Option<&'static CatalogEntry> {
    CATALOG.get(&code)
}

/// Looks up the entry for `code`, falling back to the 500 entry.
pub fn resolve(code: u16) -> &'static CatalogEntry {
    get(code).unwrap_or(&FALLBACK)
}

/// Every status code with a template, ascending.
pub fn codes() -> Vec<u16> {
    let mut codes: Vec<u16> = CATALOG.keys().copied().collect();
    codes.sort_unstable();
    codes
}
