//! End-to-end tests for the recorder pipeline
//!
//! These drive the real components — registry, serializers, queue, drain
//! task, sink manager — and verify the output files after a clean
//! shutdown.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use wsrec_recorder::{
    Direction, FormatOptions, Recorder, RecorderConfig, RecorderError, RecordFormat,
};

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

fn config(dir: &TempDir, file: &str, format: RecordFormat) -> RecorderConfig {
    RecorderConfig::default()
        .with_output(dir.path().join(file))
        .with_options(FormatOptions::default().with_format(format))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_producers_preserve_per_connection_order() {
    const CONNECTIONS: usize = 4;
    const PER_CONNECTION: usize = 50;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let recorder = Arc::new(
        Recorder::start(config(&dir, "out.csv", RecordFormat::Csv)).unwrap(),
    );

    let mut producers = Vec::new();
    for c in 0..CONNECTIONS {
        let recorder = Arc::clone(&recorder);
        producers.push(tokio::spawn(async move {
            let id = recorder.on_connected(format!("wss://host-{}.example/feed", c).as_str());
            for i in 0..PER_CONNECTION {
                recorder.on_text_message(id, format!("c{}-m{}", c, i), Direction::ClientToServer);
                tokio::task::yield_now().await;
            }
            id
        }));
    }
    for producer in producers {
        producer.await.unwrap();
    }

    let recorder = Arc::try_unwrap(recorder).unwrap();
    let metrics = recorder.metrics();
    recorder.shutdown().await.unwrap();

    let content = read(&path);
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), CONNECTIONS * PER_CONNECTION);
    assert_eq!(metrics.records_enqueued, (CONNECTIONS * PER_CONNECTION) as u64);

    // Per-connection message indices must appear in generation order
    for c in 0..CONNECTIONS {
        let needle = format!("c{}-m", c);
        let indices: Vec<usize> = lines
            .iter()
            .filter(|l| l.contains(&needle))
            .map(|l| {
                let start = l.find(&needle).unwrap() + needle.len();
                l[start..].split('"').next().unwrap().parse().unwrap()
            })
            .collect();
        assert_eq!(indices.len(), PER_CONNECTION);
        assert_eq!(indices, (0..PER_CONNECTION).collect::<Vec<_>>());
    }
}

#[tokio::test]
async fn test_xml_output_has_one_root_and_n_children() {
    const MESSAGES: usize = 7;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.xml");
    let recorder = Recorder::start(config(&dir, "out.xml", RecordFormat::Xml)).unwrap();

    let id = recorder.on_connected("wss://example.com/live");
    for i in 0..MESSAGES {
        recorder.on_text_message(id, format!("msg-{}", i), Direction::ServerToClient);
    }
    recorder.shutdown().await.unwrap();

    let content = read(&path);
    assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<wsmessages>\n"));
    assert!(content.ends_with("</wsmessages>\n"));
    assert_eq!(content.matches("<wsmessages>").count(), 1);
    assert_eq!(content.matches("<wsmessage>").count(), MESSAGES);
    assert_eq!(content.matches("</wsmessage>").count(), MESSAGES);
}

#[tokio::test]
async fn test_json_envelope_with_trailing_commas() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let recorder = Recorder::start(config(&dir, "out.json", RecordFormat::Json)).unwrap();

    let id = recorder.on_connected("wss://example.com");
    recorder.on_text_message(id, "first", Direction::ClientToServer);
    recorder.on_text_message(id, "second", Direction::ClientToServer);
    recorder.shutdown().await.unwrap();

    let content = read(&path);
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.first(), Some(&"["));
    assert_eq!(lines.last(), Some(&"]"));
    // Every record line keeps its trailing comma, including the last one
    for record in &lines[1..lines.len() - 1] {
        assert!(record.starts_with('{'));
        assert!(record.ends_with("},"));
    }
}

#[tokio::test]
async fn test_binary_messages_round_trip_base64() {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.xml");
    let recorder = Recorder::start(config(&dir, "out.xml", RecordFormat::Xml)).unwrap();

    let payload = vec![0x00, 0x01, 0x7f, 0xfe, 0xff];
    let id = recorder.on_connected("wss://example.com");
    recorder.on_binary_message(id, payload.clone(), Direction::ServerToClient);
    recorder.shutdown().await.unwrap();

    let content = read(&path);
    let start = content.find("<![CDATA[").unwrap() + "<![CDATA[".len();
    let end = content.find("]]>").unwrap();
    assert_eq!(STANDARD.decode(&content[start..end]).unwrap(), payload);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_hot_swap_loses_no_records() {
    const MESSAGES: usize = 300;
    const SWAPS: usize = 3;

    let dir = TempDir::new().unwrap();
    let recorder = Arc::new(
        Recorder::start(config(&dir, "gen-0.csv", RecordFormat::Csv)).unwrap(),
    );

    let producer = {
        let recorder = Arc::clone(&recorder);
        tokio::spawn(async move {
            let id = recorder.on_connected("wss://example.com/feed");
            for i in 0..MESSAGES {
                recorder.on_text_message(id, format!("m{}", i), Direction::ClientToServer);
                tokio::task::yield_now().await;
            }
        })
    };

    for gen in 1..=SWAPS {
        tokio::task::yield_now().await;
        recorder
            .change_output(dir.path().join(format!("gen-{}.csv", gen)))
            .unwrap();
    }
    producer.await.unwrap();

    let recorder = Arc::try_unwrap(recorder).unwrap();
    recorder.shutdown().await.unwrap();

    // Concatenating the generations in swap order yields every message
    // exactly once, in the order the connection generated them
    let mut sequence = Vec::new();
    for gen in 0..=SWAPS {
        let content = read(&dir.path().join(format!("gen-{}.csv", gen)));
        for line in content.lines() {
            let start = line.find(",\"m").unwrap() + 3;
            let index: usize = line[start..].split('"').next().unwrap().parse().unwrap();
            sequence.push(index);
        }
    }
    assert_eq!(sequence, (0..MESSAGES).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_failed_swap_keeps_recording_to_old_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let recorder = Recorder::start(config(&dir, "out.csv", RecordFormat::Csv)).unwrap();

    let id = recorder.on_connected("wss://example.com");
    recorder.on_text_message(id, "before", Direction::ClientToServer);

    let err = recorder
        .change_output(dir.path().join("no-such-dir").join("out.csv"))
        .unwrap_err();
    assert!(matches!(err, RecorderError::Io { .. }));
    assert_eq!(recorder.output_path().unwrap(), path);

    recorder.on_text_message(id, "after", Direction::ClientToServer);
    recorder.shutdown().await.unwrap();

    let content = read(&path);
    assert!(content.contains("\"before\""));
    assert!(content.contains("\"after\""));
}

#[tokio::test]
async fn test_reconfigure_swaps_whole_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let recorder = Recorder::start(config(&dir, "out.csv", RecordFormat::Csv)).unwrap();

    let id = recorder.on_connected("wss://example.com");
    recorder.on_text_message(id, "labeled-default", Direction::ClientToServer);

    let mut options = recorder.options();
    options.direction_label_cs = "outbound".into();
    options.include_url = false;
    recorder.reconfigure(options);

    recorder.on_text_message(id, "labeled-custom", Direction::ClientToServer);
    recorder.shutdown().await.unwrap();

    let content = read(&path);
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"C-S\""));
    assert!(lines[0].contains("wss://example.com"));
    assert!(lines[1].contains("\"outbound\""));
    assert!(!lines[1].contains("wss://example.com"));
}

#[tokio::test]
async fn test_disabled_recorder_skips_messages() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let recorder = Recorder::start(config(&dir, "out.csv", RecordFormat::Csv)).unwrap();

    let id = recorder.on_connected("wss://example.com");
    recorder.set_enabled(false);
    recorder.on_text_message(id, "invisible", Direction::ClientToServer);
    recorder.set_enabled(true);
    recorder.on_text_message(id, "visible", Direction::ClientToServer);

    let metrics = recorder.metrics();
    recorder.shutdown().await.unwrap();

    assert_eq!(metrics.records_skipped_disabled, 1);
    let content = read(&path);
    assert!(!content.contains("invisible"));
    assert!(content.contains("visible"));
}

#[tokio::test]
async fn test_unknown_connection_is_dropped_not_raised() {
    let dir = TempDir::new().unwrap();
    let recorder = Recorder::start(config(&dir, "out.csv", RecordFormat::Csv)).unwrap();

    recorder.on_text_message(
        wsrec_recorder::ConnectionId::new(999),
        "ghost",
        Direction::ClientToServer,
    );

    let metrics = recorder.metrics();
    assert_eq!(metrics.unknown_connection, 1);
    assert_eq!(metrics.records_enqueued, 0);
    recorder.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_start_rejects_raw_format() {
    let dir = TempDir::new().unwrap();
    let err = Recorder::start(config(&dir, "out.raw", RecordFormat::Raw)).unwrap_err();
    assert!(matches!(
        err,
        RecorderError::UnsupportedFormat(RecordFormat::Raw)
    ));
}

#[tokio::test]
async fn test_invalid_utf8_binary_drops_single_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let mut options = FormatOptions::default().with_format(RecordFormat::Csv);
    options.binary_as_base64 = false;
    let recorder = Recorder::start(
        RecorderConfig::default()
            .with_output(&path)
            .with_options(options),
    )
    .unwrap();

    let id = recorder.on_connected("wss://example.com");
    recorder.on_binary_message(id, vec![0xff, 0xfe], Direction::ServerToClient);
    recorder.on_text_message(id, "still-alive", Direction::ClientToServer);

    let metrics = recorder.metrics();
    recorder.shutdown().await.unwrap();

    assert_eq!(metrics.serialize_errors, 1);
    let content = read(&path);
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("still-alive"));
}
