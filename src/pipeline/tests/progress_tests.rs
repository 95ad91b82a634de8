use super::five_page_input;
use crate::assembly::Collaborators;
use crate::config::OptimizerConfig;
use crate::pipeline::{Phase, ProgressEvent, run};

fn collect(config: &OptimizerConfig) -> Vec<ProgressEvent> {
    let input = five_page_input();
    let mut events = Vec::new();
    run(
        &input,
        config,
        &Collaborators::default(),
        &mut |event: ProgressEvent| events.push(event),
    )
    .unwrap();
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_follow_phase_and_page_order() {
        let events = collect(&OptimizerConfig::default());

        let phases: Vec<Phase> = events.iter().map(|e| e.phase).collect();
        assert_eq!(
            phases,
            vec![
                Phase::Preparing,
                Phase::OptimizingLinks,
                Phase::OptimizingPages,
                Phase::OptimizingPages,
                Phase::OptimizingPages,
                Phase::OptimizingPages,
                Phase::OptimizingPages,
                Phase::OptimizingPages,
                Phase::ValidatingSchema,
                Phase::GeneratingSitemap,
                Phase::ValidatingPackage,
                Phase::AggregatingStats,
                Phase::Complete,
            ]
        );

        let pages: Vec<(&str, usize)> = events
            .iter()
            .filter_map(|e| e.page_id.as_deref().map(|id| (id, e.completed)))
            .collect();
        assert_eq!(
            pages,
            vec![("H", 1), ("S1", 2), ("S2", 3), ("S3", 4), ("A1", 5)]
        );
        assert!(events.iter().all(|e| e.total == 5));

        let last = events.last().unwrap();
        assert_eq!(last.completed, 5);
        assert_eq!(last.step, "Optimization complete");
    }

    #[test]
    fn test_disabled_schema_validation_skips_its_phase() {
        let config = OptimizerConfig {
            schema_validation: false,
            ..OptimizerConfig::default()
        };
        let events = collect(&config);

        assert_eq!(events.len(), 12);
        assert!(events.iter().all(|e| e.phase != Phase::ValidatingSchema));
    }

    #[test]
    fn test_failed_run_stops_after_preparing() {
        let mut input = five_page_input();
        input.blueprint.pages[1].id = "H".to_string();

        let mut events = Vec::new();
        let result = run(
            &input,
            &OptimizerConfig::default(),
            &Collaborators::default(),
            &mut |event: ProgressEvent| events.push(event),
        );

        assert!(result.is_err());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, Phase::Preparing);
    }

    #[test]
    fn test_event_serializes_with_snake_case_phase() {
        let events = collect(&OptimizerConfig::default());
        let json = serde_json::to_value(&events[3]).unwrap();
        assert_eq!(json["phase"], "optimizing_pages");
        assert_eq!(json["pageId"], "H");
        assert_eq!(json["step"], "Optimized H");
    }
}
