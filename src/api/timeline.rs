use crate::client::{endpoints, ApiClient};
use crate::errors::Error;
use crate::model::TimelinePoint;

use chrono::{DateTime, SecondsFormat, Utc};

impl ApiClient {
    pub fn timeline(&self, file_id: &str) -> Result<Vec<TimelinePoint>, Error> {
        self.get_json(&endpoints::timeline(file_id), &[])
    }

    pub fn timeline_range(
        &self,
        file_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimelinePoint>, Error> {
        self.get_json(
            &endpoints::timeline_range(file_id),
            &[
                ("start", start.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ("end", end.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ],
        )
    }
}
