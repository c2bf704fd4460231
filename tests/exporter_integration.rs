use async_trait::async_trait;
use rss_exporter::config::parse_config;
use rss_exporter::feed::{parse_feed, FeedFetcher, FeedItem, FetchError};
use rss_exporter::Exporter;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const AWS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Amazon EC2 (N. Virginia) Service Status</title>
    <link>https://status.aws.amazon.com/</link>
    <description>Service status</description>
    <item>
      <title>Service is operating normally: [RESOLVED] Increased API error rates</title>
      <link>https://status.aws.amazon.com/</link>
      <guid isPermaLink="false">https://status.aws.amazon.com/#ec2-us-east-1_1700000900</guid>
      <description>The issue has been resolved and the service is operating normally.</description>
    </item>
    <item>
      <title>Informational message: Increased API error rates</title>
      <link>https://status.aws.amazon.com/</link>
      <guid isPermaLink="false">https://status.aws.amazon.com/#ec2-us-east-1_1700000000</guid>
      <description>We are investigating increased API error rates.</description>
    </item>
  </channel>
</rss>"#;

const OPENAI_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>tag:status.openai.com,2005:/history</id>
  <title>OpenAI status</title>
  <updated>2024-05-01T12:00:00Z</updated>
  <entry>
    <id>tag:status.openai.com,2005:Incident/20000001</id>
    <title>Elevated error rates for ChatGPT</title>
    <updated>2024-05-01T11:50:00Z</updated>
    <link rel="alternate" type="text/html" href="https://status.openai.com/incidents/01"/>
    <content type="html">&lt;p&gt;Investigating - We are seeing elevated error rates.&lt;/p&gt;</content>
  </entry>
</feed>"#;

/// Serves fixed documents per URL through the real feed parser
struct FixtureFetcher {
    documents: Mutex<HashMap<String, String>>,
}

impl FixtureFetcher {
    fn new(documents: &[(&str, &str)]) -> Self {
        Self {
            documents: Mutex::new(
                documents
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
            ),
        }
    }

    fn replace(&self, url: &str, body: &str) {
        self.documents
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_string());
    }
}

#[async_trait]
impl FeedFetcher for FixtureFetcher {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<FeedItem>, FetchError> {
        let body = self
            .documents
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or(FetchError::Http(404))?;
        parse_feed(body.as_bytes())
    }
}

const CONFIG: &str = r#"
services:
  - name: aws-test
    provider: aws
    customer: acme
    url: https://status.aws.amazon.com/rss/ec2-us-east-1.rss
  - name: openai
    url: https://status.openai.com/history.atom
  - name: disabled
    url: https://example.com/disabled.rss
    enabled: false
"#;

fn exporter(fetcher: Arc<FixtureFetcher>) -> Exporter {
    let config = parse_config(CONFIG).unwrap();
    Exporter::with_fetcher(&config, fetcher).unwrap()
}

#[tokio::test]
async fn test_exposition_before_first_cycle_has_no_feed_status() {
    let exporter = exporter(Arc::new(FixtureFetcher::new(&[])));

    let output = exporter.render().unwrap();

    assert!(!output.contains("_service_status"));
    assert!(output.contains("rss_exporter_scrape_total{feed=\"aws-test\"} 0"));
    assert!(output.contains("rss_exporter_scrape_frequency_seconds{feed=\"openai\"} 300"));
    assert!(!output.contains("disabled"));
    assert!(output.contains(&format!(
        "rss_exporter_build_info{{version=\"{}\"}} 1",
        env!("CARGO_PKG_VERSION")
    )));
}

#[tokio::test]
async fn test_full_cycle_renders_every_feed() {
    let fetcher = Arc::new(FixtureFetcher::new(&[
        ("https://status.aws.amazon.com/rss/ec2-us-east-1.rss", AWS_FEED),
        ("https://status.openai.com/history.atom", OPENAI_FEED),
    ]));
    let exporter = exporter(fetcher);

    assert_eq!(exporter.run_all_once().await, 2);
    let output = exporter.render().unwrap();

    assert!(output.contains(
        "aws_test_service_status{customer=\"acme\",service=\"aws-test\",state=\"ok\"} 1"
    ));
    assert!(!output.contains("aws_test_service_issue_info"));

    assert!(output.contains(
        "openai_service_status{customer=\"\",service=\"openai\",state=\"service_issue\"} 1"
    ));
    assert!(output.contains(
        "openai_service_status{customer=\"\",service=\"openai\",state=\"ok\"} 0"
    ));
    assert!(output.contains("title=\"Elevated error rates for ChatGPT\""));
    assert!(output.contains("link=\"https://status.openai.com/incidents/01\""));

    assert!(output.contains("rss_exporter_scrape_success{feed=\"openai\"} 1"));
}

#[tokio::test]
async fn test_failed_fetch_keeps_last_published_state() {
    let fetcher = Arc::new(FixtureFetcher::new(&[
        ("https://status.aws.amazon.com/rss/ec2-us-east-1.rss", AWS_FEED),
        ("https://status.openai.com/history.atom", OPENAI_FEED),
    ]));
    let exporter = exporter(Arc::clone(&fetcher));
    exporter.run_all_once().await;

    fetcher.replace("https://status.openai.com/history.atom", "<html>maintenance</html>");
    assert_eq!(exporter.run_all_once().await, 1);

    let output = exporter.render().unwrap();
    assert!(output.contains(
        "openai_service_status{customer=\"\",service=\"openai\",state=\"service_issue\"} 1"
    ));
    assert!(output.contains("rss_exporter_scrape_failed_total{feed=\"openai\"} 1"));
    assert!(output.contains("rss_exporter_scrape_success{feed=\"openai\"} 0"));
}

#[tokio::test]
async fn test_describe_lists_feed_and_cycle_metrics() {
    let exporter = exporter(Arc::new(FixtureFetcher::new(&[])));

    let descriptions = exporter.describe();
    let markdown = descriptions.to_markdown();

    assert!(descriptions.get("aws_test_service_status").is_some());
    assert!(descriptions.get("openai_service_issue_info").is_some());
    assert!(descriptions.get("disabled_service_status").is_none());
    assert!(markdown.starts_with("| Metric | Description | Labels |"));
    assert!(markdown.contains("`rss_exporter_scrape_duration_seconds`"));
    assert!(markdown.contains("`rss_exporter_build_info`"));

    let jira = descriptions.to_jira_markup();
    assert!(jira.starts_with("||Metric||Description||Labels||"));
    assert!(jira.contains("|rss_exporter_build_info|Version of the running exporter|{{ version }}|"));
    assert_eq!(exporter.feed_count(), 2);
}
