use vitals_types::{CompositeScore, Severity, Subsystem};

/// Contribution of a subsystem to the numeric score.
///
/// Time Machine and Bluetooth carry no weight: they can still raise the
/// overall severity and show up in reasons, but never move the number.
pub fn weight(subsystem: Subsystem) -> Option<u32> {
    match subsystem {
        Subsystem::Cpu => Some(20),
        Subsystem::Memory => Some(25),
        Subsystem::Disk => Some(15),
        Subsystem::Thermal => Some(20),
        Subsystem::Battery => Some(10),
        Subsystem::ICloud => Some(5),
        Subsystem::Network => Some(5),
        Subsystem::TimeMachine | Subsystem::Bluetooth => None,
    }
}

/// Score a set of subsystem severities.
///
/// `statuses` should be in declaration order; reasons keep that order.
pub fn compute_score(statuses: &[(Subsystem, Severity)]) -> CompositeScore {
    let (weighted, total_weight) = statuses
        .iter()
        .filter_map(|(subsystem, severity)| weight(*subsystem).map(|w| (w, severity.score())))
        .fold((0u32, 0u32), |(sum, total), (w, score)| {
            (sum + w * score, total + w)
        });

    let value = if total_weight == 0 {
        Severity::Nominal.score()
    } else {
        weighted / total_weight
    };

    let status = Severity::worst(
        statuses
            .iter()
            .map(|(subsystem, severity)| severity.capped_at(subsystem.severity_cap())),
    );

    let reasons = statuses
        .iter()
        .filter(|(_, severity)| !severity.is_nominal())
        .map(|(subsystem, severity)| format!("{}:{}", subsystem, severity))
        .collect();

    CompositeScore {
        status,
        value,
        reasons,
    }
}
