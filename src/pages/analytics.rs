use chrono::{DateTime, Utc};
use tracing::warn;

use super::LoadState;
use crate::{
    api::{
        models::{BatchAnalytics, Role, SiteId, SiteSummary, User},
        ApiClient,
    },
    locale,
};

/// Most recent `updated_at` among the site's batches.
pub fn last_modified_batch_date(site: &SiteSummary) -> Option<DateTime<Utc>> {
    site.batches.iter().map(|b| b.updated_at).max()
}

/// One line of the batch-tracking accordion.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchTrackingRow {
    pub site_id: SiteId,
    pub name: String,
    pub last_update: Option<DateTime<Utc>>,
    pub batch_count: usize,
    pub batch_label: String,
}

impl BatchTrackingRow {
    fn new(site: &SiteSummary) -> Self {
        Self {
            site_id: site.id,
            name: site.name.clone(),
            last_update: last_modified_batch_date(site),
            batch_count: site.batches.len(),
            batch_label: locale::translate_count("analytics.batches", site.batches.len()),
        }
    }
}

/// Dashboard of every site with its batches.
#[derive(Debug, Default)]
pub struct AnalyticsPage {
    summaries: Vec<SiteSummary>,
    admins: Vec<User>,
    error: Option<String>,
}

impl AnalyticsPage {
    /// Site managers are only listed for MegaAdmins; other users never
    /// trigger that request.
    pub async fn load(api: &ApiClient, current_user: Option<&User>) -> Self {
        let is_mega_admin = current_user.map(|u| u.role == Role::MegaAdmin).unwrap_or(false);

        let (summaries, admins) = futures::join!(api.summary_client.all(), async {
            if is_mega_admin {
                Some(api.user_client.all_site_managers().await)
            } else {
                None
            }
        });

        let mut page = Self::default();
        match summaries {
            Ok(summaries) => page.summaries = summaries,
            Err(e) => {
                warn!(error = %e, "failed to load site summaries");
                page.error = Some(e.to_string());
            }
        }
        match admins {
            Some(Ok(admins)) => page.admins = admins,
            Some(Err(e)) => {
                warn!(error = %e, "failed to load site managers");
                if page.error.is_none() {
                    page.error = Some(e.to_string());
                }
            }
            None => {}
        }

        page
    }

    pub fn summaries(&self) -> &[SiteSummary] {
        &self.summaries
    }

    /// Replaces the summaries after a site card edited one of them.
    pub fn set_summaries(&mut self, summaries: Vec<SiteSummary>) {
        self.summaries = summaries;
    }

    pub fn admins(&self) -> &[User] {
        &self.admins
    }

    pub fn admins_of(&self, site_id: SiteId) -> Vec<&User> {
        self.admins.iter().filter(|u| u.admin_site_ids.contains(&site_id)).collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn batch_tracking(&self) -> Vec<BatchTrackingRow> {
        self.summaries.iter().map(BatchTrackingRow::new).collect()
    }
}

/// Landing page listing batches.
#[derive(Debug)]
pub struct HomePage {
    batches: LoadState<Vec<BatchAnalytics>>,
}

impl HomePage {
    pub async fn load(api: &ApiClient) -> Self {
        let batches = match api.batch_client.all().await {
            Ok(batches) => LoadState::Loaded(batches),
            Err(e) => {
                warn!(error = %e, "failed to load batches");
                LoadState::Error(e.to_string())
            }
        };

        Self { batches }
    }

    pub fn batches(&self) -> &LoadState<Vec<BatchAnalytics>> {
        &self.batches
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::api::models::BatchSummary;

    fn batch(id: u64, day: u32) -> BatchSummary {
        BatchSummary { id, name: format!("batch {}", id), updated_at: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap() }
    }

    #[test]
    fn last_update_is_latest_batch() {
        let site = SiteSummary { id: 1, name: "Parc".into(), batches: vec![batch(1, 3), batch(2, 20), batch(3, 9)] };

        assert_eq!(last_modified_batch_date(&site), Some(Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap()));
    }

    #[test]
    fn rows_without_batches() {
        let page = AnalyticsPage {
            summaries: vec![SiteSummary { id: 1, name: "Parc".into(), batches: vec![] }],
            ..Default::default()
        };

        let rows = page.batch_tracking();

        assert_eq!(rows[0].last_update, None);
        assert_eq!(rows[0].batch_count, 0);
        assert_eq!(rows[0].batch_label, "batches");
    }

    #[test]
    fn admins_are_grouped_by_site() {
        let page = AnalyticsPage {
            admins: vec![
                User { id: 1, username: "a".into(), email: "a@x.org".into(), role: Role::SiteManager, admin_site_ids: vec![1, 2] },
                User { id: 2, username: "b".into(), email: "b@x.org".into(), role: Role::SiteManager, admin_site_ids: vec![2] },
            ],
            ..Default::default()
        };

        assert_eq!(page.admins_of(1).len(), 1);
        assert_eq!(page.admins_of(2).len(), 2);
        assert!(page.admins_of(3).is_empty());
    }
}
