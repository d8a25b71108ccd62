//! Configuration-built pipeline driving real subprocesses
#![cfg(unix)]

mod harness;

use std::io::Cursor;

use harness::config::{ConfigBuilder, VOICE_FRAMES, VOICE_SAMPLE_RATE};
use harness::server::TestServer;
use tts_adapter::AudioFormat;

#[tokio::test]
async fn audio_carries_trailing_silence() {
    let test_config = ConfigBuilder::new().build();
    let server = TestServer::start(&test_config.config).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/synthesize/%D0%94%D0%B0"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "audio/mpeg");
    assert_eq!(resp.headers()["content-disposition"], "inline; filename=\"speech.mp3\"");

    // The stand-in transcoder copies its input, so the body is the WAV as written
    let body = resp.bytes().await.unwrap();
    let reader = hound::WavReader::new(Cursor::new(body.to_vec())).unwrap();

    assert_eq!(reader.spec().sample_rate, VOICE_SAMPLE_RATE);
    assert_eq!(reader.duration(), VOICE_FRAMES + VOICE_SAMPLE_RATE / 2);

    assert_eq!(test_config.last_synthesized(), "Да");
    assert!(
        test_config
            .last_synthesizer_args()
            .contains("--length_scale 2 --output_file -"),
        "{}",
        test_config.last_synthesizer_args()
    );
    assert_eq!(std::fs::read_dir(test_config.scratch_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn dictionary_stress_and_builtin_patch() {
    let test_config = ConfigBuilder::new().with_dictionary(&["шм+огла", "# comment", "м+олоко"]).build();
    let server = TestServer::start(&test_config.config).await.unwrap();

    let (format, audio) = server.provider().async_get_tts_audio("Не шмогла", None, None).await;

    assert_eq!(format, Some(AudioFormat::Mp3));
    assert!(audio.is_some());
    assert_eq!(test_config.last_synthesized(), "Не шмогл+а");

    server.provider().async_get_tts_audio("Молоко", None, None).await;
    assert_eq!(test_config.last_synthesized(), "М+олоко");
}

#[tokio::test]
async fn configured_patch_applies_after_accent() {
    let test_config = ConfigBuilder::new()
        .with_dictionary(&["з+амок"])
        .with_patch("Старый з+амок", "Старый зам+ок")
        .build();
    let server = TestServer::start(&test_config.config).await.unwrap();

    server.provider().async_get_tts_audio("Старый замок", None, None).await;

    assert_eq!(test_config.last_synthesized(), "Старый зам+ок");
}

#[tokio::test]
async fn missing_dictionary_degrades_to_raw_text() {
    let test_config = ConfigBuilder::new().with_missing_dictionary().build();
    let server = TestServer::start(&test_config.config).await.unwrap();

    let (_, audio) = server.provider().async_get_tts_audio("Не шмогла", None, None).await;

    assert!(audio.is_some());
    assert_eq!(test_config.last_synthesized(), "Не шмогла");
}

#[tokio::test]
async fn failing_accent_command_degrades_to_raw_text() {
    let test_config = ConfigBuilder::new().with_failing_accent_command().build();
    let server = TestServer::start(&test_config.config).await.unwrap();

    let (_, audio) = server.provider().async_get_tts_audio("Привет", None, None).await;

    assert!(audio.is_some());
    assert_eq!(test_config.last_synthesized(), "Привет");
}

#[tokio::test]
async fn broken_transcoder_reports_stderr() {
    let test_config = ConfigBuilder::new().with_broken_transcoder().build();
    let server = TestServer::start(&test_config.config).await.unwrap();

    let resp = server.client().get(server.url("/synthesize/hello")).send().await.unwrap();

    assert_eq!(resp.status(), 500);
    let body = resp.text().await.unwrap();
    assert!(body.starts_with("FFmpeg conversion error:"), "{body}");
    assert!(body.contains("Unknown encoder 'libmp3lame'"), "{body}");
    assert_eq!(std::fs::read_dir(test_config.scratch_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn missing_model_fails_startup() {
    let mut test_config = ConfigBuilder::new().build();
    test_config.config.synthesis.model_path.set_file_name("absent.onnx");

    assert!(TestServer::start(&test_config.config).await.is_err());
}
