//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Persisted record shape
//! - Mock ingestion -> JSON log -> statistics (no network)
//! - Recovery from a damaged log
//! - Concurrent readers over one log

#[cfg(test)]
mod contract_tests {
    use contracts::{NewSample, Record};

    #[test]
    fn test_record_field_names() {
        let record = NewSample {
            temperature: 21.5,
            windspeed: 4.0,
            winddirection: 180.0,
            interval: 900,
        }
        .into_record(7, "2024-11-05T13:04:05".parse().unwrap());

        let value = serde_json::to_value(&record).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["id", "interval", "temperature", "timestamp", "winddirection", "windspeed"]
        );
        assert_eq!(value["timestamp"], "2024-11-05T13:04:05");
    }

    #[test]
    fn test_reads_log_written_by_other_producers() {
        // Fractional seconds and extra fields, as a Python writer produces them
        let log = r#"[
            {"id": 0, "timestamp": "2024-11-05T13:04:05.123456", "temperature": 18.4,
             "windspeed": 7.2, "winddirection": 315, "interval": 900,
             "time": "2024-11-05T13:00", "weathercode": 0, "is_day": 1}
        ]"#;
        let records: Vec<Record> = serde_json::from_str(log).unwrap();
        assert_eq!(records[0].winddirection, 315.0);
        assert_eq!(records[0].interval, 900);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;
    use std::sync::Arc;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{AppConfig, NewSample, RecordStore, StoreConfig};
    use ingestion::{ingest_once, MockSampleSource};
    use observability::{EventCapture, Observer};
    use stats_engine::WeatherEngine;
    use store::JsonFileStore;
    use tracing::Level;

    fn config_for(log: &Path) -> AppConfig {
        let toml = format!(
            "[store]\npath = {:?}\nclock = \"utc\"\n\n[engine]\ncalm_threshold = 5.0\n",
            log.display().to_string()
        );
        ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap()
    }

    async fn open(config: &StoreConfig) -> Arc<JsonFileStore> {
        Arc::new(JsonFileStore::open(config, Observer::silent("store")).await.unwrap())
    }

    fn sample(temperature: f64, windspeed: f64, winddirection: f64) -> NewSample {
        NewSample {
            temperature,
            windspeed,
            winddirection,
            interval: 3600,
        }
    }

    /// End-to-end: config -> mock source -> JSON log -> engine
    #[tokio::test]
    async fn test_e2e_mock_ingest_then_summary() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("data/log.json"));
        let store = open(&config.store).await;
        let source = MockSampleSource::default();

        for expected in 0..24 {
            let record = ingest_once(&source, store.as_ref()).await.unwrap();
            assert_eq!(record.id, expected);
        }

        let engine = WeatherEngine::new(
            store.clone(),
            config.engine.clone(),
            Observer::silent("engine"),
        );
        let summary = engine.weather_summary(24).await.unwrap();

        assert_eq!(summary.data_points, 24);
        // Full sine cycle around 15 °C
        assert_eq!(summary.avg_temperature, Some(15.0));
        let range = summary.temp_range.unwrap();
        assert_eq!((range.min, range.max, range.range), (10.0, 20.0, 10.0));
        // Windspeed sawtooth 3..=7: 3 and 4 are calm
        let calm = summary.calm_periods.unwrap();
        assert_eq!((calm.calm_periods, calm.total_periods), (10, 24));
        assert_eq!(summary.peak_windspeed, Some(7.0));
        // Constant 7.5° turns
        assert_eq!(summary.wind_variability, Some(0.0));
    }

    #[tokio::test]
    async fn test_ids_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("log.json"));

        {
            let store = open(&config.store).await;
            for t in [1.0, 2.0, 3.0] {
                store.append(sample(t, 1.0, 0.0)).await.unwrap();
            }
        }

        let store = open(&config.store).await;
        let record = store.append(sample(4.0, 1.0, 0.0)).await.unwrap();
        assert_eq!(record.id, 3);

        let ids: Vec<_> = store.read_all().await.iter().map(|r| r.id).collect();
        assert_eq!(ids, [0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_damaged_log_reads_empty_then_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("log.json"));
        let capture = EventCapture::new();
        let store = Arc::new(
            JsonFileStore::open(
                &config.store,
                Observer::with_dispatch("store", capture.dispatch()),
            )
            .await
            .unwrap(),
        );
        for t in [10.0, 11.0] {
            store.append(sample(t, 1.0, 0.0)).await.unwrap();
        }

        std::fs::write(&config.store.path, "{ truncated").unwrap();

        let engine = WeatherEngine::new(
            store.clone(),
            config.engine.clone(),
            Observer::silent("engine"),
        );
        assert!(engine.average_temperature(24).await.is_none());
        assert!(engine.weather_summary(24).await.is_none());

        let record = store.append(sample(12.0, 1.0, 0.0)).await.unwrap();
        assert_eq!(record.id, 0);
        assert_eq!(store.read_all().await.len(), 1);
        assert!(capture.count_at(Level::ERROR) >= 1);
        assert_eq!(engine.average_temperature(24).await, Some(12.0));
    }

    #[tokio::test]
    async fn test_concurrent_readers_agree() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("log.json"));
        let store = open(&config.store).await;
        for (t, w, d) in [
            (10.0, 2.0, 350.0),
            (12.0, 6.0, 10.0),
            (14.0, 4.0, 30.0),
            (13.0, 5.0, 90.0),
            (11.0, 8.0, 90.0),
        ] {
            store.append(sample(t, w, d)).await.unwrap();
        }

        let engine = Arc::new(WeatherEngine::new(
            store,
            config.engine.clone(),
            Observer::silent("engine"),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                tokio::spawn(async move { engine.weather_summary(5).await })
            })
            .collect();

        let expected = engine.weather_summary(5).await.unwrap();
        assert_eq!(expected.avg_temperature, Some(12.0));
        for handle in handles {
            assert_eq!(handle.await.unwrap(), Some(expected.clone()));
        }
    }

    #[tokio::test]
    async fn test_no_result_outcomes_are_captured() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("log.json"));
        let store = open(&config.store).await;
        let capture = EventCapture::new();
        let engine = WeatherEngine::new(
            store,
            config.engine.clone(),
            Observer::with_dispatch("engine", capture.dispatch()),
        );

        assert!(engine.peak_windspeed(0).await.is_none());
        assert!(engine.peak_windspeed(5).await.is_none());

        assert_eq!(capture.count_at(Level::WARN), 2);
        assert!(capture.contains("period must be a positive integer"));
        assert!(capture.contains("no data available"));
    }
}
