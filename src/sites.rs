//! TOTP site list and the API payloads that carry it.
//!
//! Every payload that returns codes also says, in `next_update` seconds, how
//! long those codes stay valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitesError {
    #[error("Malformed sites payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One account whose current code is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    pub name: String,
    pub code: String,
}

impl Site {
    /// Code grouped for reading, `"123456"` becomes `"123 456"`.
    pub fn display_code(&self) -> String {
        match self.code.char_indices().nth(3) {
            Some((split, _)) => format!("{} {}", &self.code[..split], &self.code[split..]),
            None => format!("{} ", self.code),
        }
    }
}

/// Converts the server's `next_update` seconds into a duration, rounded to
/// the millisecond. Negative or non-finite values mean "now".
pub fn next_update_delay(next_update: f64) -> Duration {
    if !next_update.is_finite() || next_update <= 0.0 {
        return Duration::ZERO;
    }
    let millis = (next_update * 1000.0).round().min(u32::MAX as f64);
    Duration::from_millis(millis as u64)
}

/// Body of `GET /sites`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SitesResponse {
    pub sites: Vec<Site>,
    pub next_update: f64,
}

impl SitesResponse {
    pub fn from_json(body: &str) -> Result<Self, SitesError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn next_update_in(&self) -> Duration {
        next_update_delay(self.next_update)
    }
}

/// Body of `POST /sites` and `PATCH /sites/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteResponse {
    #[serde(flatten)]
    pub site: Site,
    pub next_update: f64,
}

impl SiteResponse {
    pub fn from_json(body: &str) -> Result<Self, SitesError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn next_update_in(&self) -> Duration {
        next_update_delay(self.next_update)
    }
}

#[cfg(feature = "async")]
mod windows {
    use super::{SiteResponse, SitesResponse};
    use crate::refresh::RefreshWindow;

    impl SitesResponse {
        /// Validity window of these codes, opening now.
        pub fn next_window(&self) -> RefreshWindow {
            RefreshWindow::starting_now(self.next_update_in())
        }
    }

    impl SiteResponse {
        pub fn next_window(&self) -> RefreshWindow {
            RefreshWindow::starting_now(self.next_update_in())
        }
    }
}

/// Sites currently displayed, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteList {
    sites: Vec<Site>,
}

impl SiteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, sites: Vec<Site>) {
        self.sites = sites;
    }

    pub fn add(&mut self, site: Site) {
        self.sites.push(site);
    }

    /// Replaces the site with the same id. Returns `false` if there is none.
    pub fn update(&mut self, site: Site) -> bool {
        match self.sites.iter_mut().find(|s| s.id == site.id) {
            Some(existing) => {
                *existing = site;
                true
            }
            None => false,
        }
    }

    /// Removes the site with `id`, returning it.
    pub fn remove(&mut self, id: u64) -> Option<Site> {
        let index = self.sites.iter().position(|s| s.id == id)?;
        Some(self.sites.remove(index))
    }

    pub fn get(&self, id: u64) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: u64, name: &str, code: &str) -> Site {
        Site {
            id,
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    #[test]
    fn test_display_code() {
        assert_eq!(site(1, "a", "123456").display_code(), "123 456");
        assert_eq!(site(1, "a", "12345678").display_code(), "123 45678");
        assert_eq!(site(1, "a", "12").display_code(), "12 ");
    }

    #[test]
    fn test_parse_sites_response() {
        let body = r#"{
            "sites": [
                {"id": 1, "name": "GitHub", "code": "492039"},
                {"id": 7, "name": "Mail", "code": "000123"}
            ],
            "next_update": 12.3456
        }"#;
        let response = SitesResponse::from_json(body).expect("valid payload");
        assert_eq!(response.sites.len(), 2);
        assert_eq!(response.sites[1].name, "Mail");
        assert_eq!(response.next_update_in(), Duration::from_millis(12_346));
    }

    #[test]
    fn test_parse_site_response_flattened() {
        let body = r#"{"id": 3, "name": "Bank", "code": "111222", "next_update": 4}"#;
        let response = SiteResponse::from_json(body).expect("valid payload");
        assert_eq!(response.site, site(3, "Bank", "111222"));
        assert_eq!(response.next_update_in(), Duration::from_secs(4));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            SitesResponse::from_json(r#"{"sites": "nope"}"#),
            Err(SitesError::Malformed(_))
        ));
    }

    #[test]
    fn test_next_update_delay_edges() {
        assert_eq!(next_update_delay(-3.0), Duration::ZERO);
        assert_eq!(next_update_delay(f64::NAN), Duration::ZERO);
        assert_eq!(next_update_delay(0.0004), Duration::ZERO);
        assert_eq!(next_update_delay(0.002), Duration::from_millis(2));
    }

    #[test]
    fn test_site_list_operations() {
        let mut list = SiteList::new();
        assert!(list.is_empty());

        list.replace_all(vec![site(1, "a", "111111"), site(2, "b", "222222")]);
        list.add(site(3, "c", "333333"));
        assert_eq!(list.len(), 3);

        assert!(list.update(site(2, "renamed", "999999")));
        assert_eq!(list.get(2).map(|s| s.name.as_str()), Some("renamed"));
        assert!(!list.update(site(42, "ghost", "000000")));

        assert_eq!(list.remove(1).map(|s| s.id), Some(1));
        assert_eq!(list.remove(1), None);

        let ids: Vec<_> = list.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}

#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::refresh::{RefreshScheduler, RefreshWindow, SchedulerState};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tokio::time::{Instant, sleep};

    #[tokio::test(start_paused = true)]
    async fn test_next_window_starts_now() {
        let response = SitesResponse {
            sites: Vec::new(),
            next_update: 30.0,
        };
        let window = response.next_window();
        assert_eq!(window.started_at, Instant::now());
        assert_eq!(window.duration, Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_loop_updates_site_list() {
        let bodies = Arc::new(Mutex::new(VecDeque::from([
            r#"{"sites": [{"id": 1, "name": "GitHub", "code": "111111"}], "next_update": 30}"#,
            r#"{"sites": [{"id": 1, "name": "GitHub", "code": "222222"}], "next_update": 30}"#,
            "<html>bad gateway</html>",
        ])));
        let list = Arc::new(Mutex::new(SiteList::new()));
        let scheduler = RefreshScheduler::new();

        let action = {
            let bodies = Arc::clone(&bodies);
            let list = Arc::clone(&list);
            move || {
                let body = bodies.lock().unwrap().pop_front();
                let list = Arc::clone(&list);
                async move {
                    let response = SitesResponse::from_json(body?).ok()?;
                    let window = response.next_window();
                    list.lock().unwrap().replace_all(response.sites);
                    Some(window)
                }
            }
        };
        scheduler
            .arm(RefreshWindow::starting_now(Duration::ZERO), action)
            .expect("arm");

        sleep(Duration::from_secs(1)).await;
        assert_eq!(list.lock().unwrap().get(1).map(|s| s.code.clone()), Some("111111".into()));
        assert_eq!(scheduler.state(), SchedulerState::Scheduled);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(list.lock().unwrap().get(1).map(|s| s.code.clone()), Some("222222".into()));

        sleep(Duration::from_secs(30)).await;
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(bodies.lock().unwrap().is_empty());
        assert_eq!(list.lock().unwrap().len(), 1);
    }
}
