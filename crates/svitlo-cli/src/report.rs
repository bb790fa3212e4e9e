//! Human-readable report for one outage status, in the wording end users
//! of the original chat bot see.

use svitlo_dtek::OutageStatus;

/// Formats a status as a multi-line Ukrainian report.
pub(crate) fn format_report(status: &OutageStatus) -> String {
    let status_line = if status.has_outage {
        "🔴 Немає світла"
    } else {
        "🟢 Світло є (або немає відключення зараз)"
    };

    format!(
        "{status_line}\n\
         Причина: {}\n\
         Група/черга: {}\n\
         Початок: {}\n\
         Орієнтовно до: {}\n\
         Оновлено: {}",
        status.reason, status.queue_group, status.start_date, status.end_date, status.updated_at
    )
}
