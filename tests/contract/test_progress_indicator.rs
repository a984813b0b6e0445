//! Contract Tests for the Progress Indicator
//!
//! Contract: at most one animation task, idempotent start and stop, and no
//! output from the indicator once `stop` has returned.

use pathfinder_harness::progress::{clear_line, IndicatorState, FRAMES};
use pathfinder_harness::{Console, ProgressIndicator};
use std::time::Duration;

fn fast_indicator(message: &str) -> (ProgressIndicator, pathfinder_harness::console::CapturedOutput) {
    let (console, captured) = Console::capture();
    let indicator = ProgressIndicator::new(console)
        .with_message(message)
        .with_interval(Duration::from_millis(5));
    (indicator, captured)
}

#[tokio::test]
async fn test_default_message() {
    let (console, _captured) = Console::capture();
    let indicator = ProgressIndicator::new(console);
    assert_eq!(indicator.message(), "Processing");
    assert_eq!(indicator.state(), IndicatorState::Idle);
}

#[tokio::test]
async fn test_start_twice_runs_one_task() {
    let (mut indicator, captured) = fast_indicator("Building");

    indicator.start();
    indicator.start();
    assert_eq!(indicator.state(), IndicatorState::Running);
    tokio::time::sleep(Duration::from_millis(40)).await;
    indicator.stop().await;

    // A second task would leave a second clear line behind
    let output = captured.contents();
    assert_eq!(output.matches(&clear_line("Building")).count(), 1);
    assert_eq!(indicator.state(), IndicatorState::Idle);
}

#[tokio::test]
async fn test_stop_twice_is_harmless() {
    let (mut indicator, captured) = fast_indicator("Cleaning");

    indicator.stop().await;
    assert!(captured.is_empty());

    indicator.start();
    indicator.stop().await;
    let after_first = captured.contents();
    indicator.stop().await;
    assert_eq!(captured.contents(), after_first);
}

#[tokio::test]
async fn test_frames_cycle_in_order() {
    let (mut indicator, captured) = fast_indicator("Running");

    indicator.start();
    tokio::time::sleep(Duration::from_millis(80)).await;
    indicator.stop().await;

    let output = captured.contents();
    let symbols: Vec<char> = output
        .split('\r')
        .filter_map(|frame| frame.strip_prefix("Running "))
        .filter_map(|rest| rest.chars().next())
        .collect();
    assert!(symbols.len() >= 2, "expected several frames, got {:?}", output);
    for (index, symbol) in symbols.iter().enumerate() {
        assert_eq!(*symbol, FRAMES[index % FRAMES.len()]);
    }
}

#[tokio::test]
async fn test_nothing_written_after_stop() {
    let (mut indicator, captured) = fast_indicator("Searching");

    indicator.start();
    tokio::time::sleep(Duration::from_millis(20)).await;
    indicator.stop().await;

    let at_stop = captured.contents();
    assert!(at_stop.ends_with(&clear_line("Searching")));

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(captured.contents(), at_stop);
}

#[tokio::test]
async fn test_restart_after_stop() {
    let (mut indicator, captured) = fast_indicator("Building");

    indicator.start();
    indicator.stop().await;
    indicator.set_message("Running");
    indicator.start();
    assert!(indicator.is_running());
    tokio::time::sleep(Duration::from_millis(20)).await;
    indicator.stop().await;

    let output = captured.contents();
    assert!(output.contains("\rRunning "));
    assert!(output.ends_with(&clear_line("Running")));
}

#[tokio::test]
async fn test_drop_while_running_does_not_hang() {
    let (mut indicator, captured) = fast_indicator("Building");
    indicator.start();
    drop(indicator);

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(captured.contents().ends_with(&clear_line("Building")));
}
