use super::{five_page_input, nameless_provider_input};
use crate::assembly::Collaborators;
use crate::config::OptimizerConfig;
use crate::pipeline::workers::run_concurrent;
use crate::pipeline::{ChannelProgress, NoProgress, ProgressEvent, run};
use tokio::sync::mpsc;

fn config(max_concurrency: usize) -> OptimizerConfig {
    OptimizerConfig {
        link_density_target: 3,
        max_concurrency,
        ..OptimizerConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_output_matches_sequential() {
        for input in [five_page_input(), nameless_provider_input()] {
            let sequential = run(&input, &config(2), &Collaborators::default(), &mut NoProgress)
                .unwrap()
                .to_json()
                .unwrap();
            let concurrent =
                run_concurrent(&input, &config(2), &Collaborators::default(), &mut NoProgress)
                    .await
                    .unwrap()
                    .to_json()
                    .unwrap();
            assert_eq!(sequential, concurrent);
        }
    }

    #[tokio::test]
    async fn test_concurrent_events_match_sequential() {
        let input = five_page_input();

        let mut sequential = Vec::new();
        run(
            &input,
            &config(1),
            &Collaborators::default(),
            &mut |event: ProgressEvent| sequential.push(event),
        )
        .unwrap();

        let mut concurrent = Vec::new();
        run_concurrent(
            &input,
            &config(4),
            &Collaborators::default(),
            &mut |event: ProgressEvent| concurrent.push(event),
        )
        .await
        .unwrap();

        assert_eq!(sequential, concurrent);
    }

    #[tokio::test]
    async fn test_channel_sink_receives_every_event() {
        let input = five_page_input();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut sink = ChannelProgress::from(tx);

        run_concurrent(&input, &config(3), &Collaborators::default(), &mut sink)
            .await
            .unwrap();
        drop(sink);

        let mut received = Vec::new();
        while let Some(event) = rx.recv().await {
            received.push(event);
        }
        assert_eq!(received.len(), 13);
        assert_eq!(
            received.iter().filter(|e| e.page_id.is_some()).count(),
            5
        );
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let input = five_page_input();
        let package = run_concurrent(&input, &config(0), &Collaborators::default(), &mut NoProgress)
            .await
            .unwrap();
        assert_eq!(package.pages.len(), 5);
    }
}
