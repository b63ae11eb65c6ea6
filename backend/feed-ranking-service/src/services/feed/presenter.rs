use crate::models::Video;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A ranked video as the feed grid renders it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedItem {
    pub video_id: String,
    pub title: String,
    pub channel_id: String,
    pub channel_name: String,
    pub thumbnail_url: String,
    pub embed_link: String,
    pub description: String,
    pub category: String,
    /// e.g. "1.2 Juta"
    pub views_label: String,
    /// e.g. "5 hari lalu"
    pub uploaded_label: String,
}

impl FeedItem {
    pub fn from_video(video: Video, now: DateTime<Utc>) -> Self {
        let views_label = video.view_count.label();
        let uploaded_label = video.upload_time.label(now);

        Self {
            video_id: video.id,
            title: video.title,
            channel_id: video.channel_id,
            channel_name: video.channel_name,
            thumbnail_url: video.thumbnail_url,
            embed_link: video.embed_link,
            description: video.description,
            category: video.category,
            views_label,
            uploaded_label,
        }
    }
}

pub fn present(videos: Vec<Video>, now: DateTime<Utc>) -> Vec<FeedItem> {
    videos
        .into_iter()
        .map(|video| FeedItem::from_video(video, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UploadTime, ViewCount};
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_labels_for_raw_and_preformatted_values() {
        let now = Utc.with_ymd_and_hms(2025, 10, 16, 12, 0, 0).unwrap();
        let raw = Video {
            id: "v1".to_string(),
            category: "Musik".to_string(),
            channel_id: "ch1".to_string(),
            view_count: ViewCount::Count(1_234_567),
            upload_time: UploadTime::At(now - Duration::hours(3)),
            title: "Konser".to_string(),
            channel_name: "Musik Kita".to_string(),
            thumbnail_url: String::new(),
            embed_link: String::new(),
            description: String::new(),
        };
        let preformatted = Video {
            id: "v2".to_string(),
            view_count: ViewCount::Label("850 Ribu".to_string()),
            upload_time: UploadTime::Label("3 Minggu Lalu".to_string()),
            ..raw.clone()
        };

        let items = present(vec![raw, preformatted], now);

        assert_eq!(items[0].views_label, "1.2 Juta");
        assert_eq!(items[0].uploaded_label, "3 jam lalu");
        assert_eq!(items[0].title, "Konser");
        assert_eq!(items[1].views_label, "850 Ribu");
        assert_eq!(items[1].uploaded_label, "3 Minggu Lalu");
    }
}
