// src/session.rs
// Session state and the redirect rules between the three screens.

use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Session probe in flight; nothing else is shown.
    Checking,
    Login,
    Register,
    Verifier,
}

impl Route {
    /// Maps a path to a screen. Unknown paths yield `None` and are sent to
    /// the fallback by [`resolve_path`].
    pub fn from_path(path: &str) -> Option<Route> {
        match path.trim_end_matches('/') {
            "/login" => Some(Route::Login),
            "/registro" | "/register" => Some(Route::Register),
            "/verificador" | "/verifier" => Some(Route::Verifier),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Checking => "/",
            Route::Login => "/login",
            Route::Register => "/registro",
            Route::Verifier => "/verificador",
        }
    }
}

/// Applies the guard for a requested screen.
pub fn resolve(requested: Route, logged_in: bool) -> Route {
    match (requested, logged_in) {
        (Route::Login, true) => Route::Verifier,
        (Route::Verifier, false) => Route::Login,
        (Route::Checking, true) => Route::Verifier,
        (Route::Checking, false) => Route::Login,
        (route, _) => route,
    }
}

pub fn resolve_path(path: &str, logged_in: bool) -> Route {
    match Route::from_path(path) {
        Some(route) => resolve(route, logged_in),
        None => fallback(logged_in),
    }
}

fn fallback(logged_in: bool) -> Route {
    if logged_in {
        Route::Verifier
    } else {
        Route::Login
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub user_email: Option<String>,
    pub checked: bool,
}

impl Session {
    /// Records the outcome of the startup probe and returns where to go.
    pub fn probe_finished(&mut self, ok: bool) -> Route {
        self.checked = true;
        self.logged_in = ok;
        debug!("Session probe finished, logged_in={}", ok);
        fallback(ok)
    }

    pub fn logged_in(&mut self) -> Route {
        self.logged_in = true;
        resolve(Route::Login, true)
    }

    /// Always ends logged out, whether or not the server saw the request.
    pub fn logged_out(&mut self) -> Route {
        self.logged_in = false;
        self.user_email = None;
        Route::Login
    }

    pub fn navigate(&self, requested: Route) -> Route {
        if !self.checked {
            return Route::Checking;
        }
        resolve(requested, self.logged_in)
    }
}
