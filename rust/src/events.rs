//! Calendar events derived from a schedule.
//!
//! Produces one kickoff meeting, one deadline marker per milestone task and,
//! when the project has a deadline, a final review a week before it. Milestone
//! markers follow a fixed two-week cadence from the reference date rather than
//! the milestone task's own due date.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use rustc_hash::FxHashSet;

use crate::color::{color_seed, project_color};
use crate::log_changes;
use crate::models::{CalendarEvent, EventType, Priority, ProjectContext, ScheduledTask};
use crate::scheduler::add_days;

const MILESTONE_SPACING_DAYS: i64 = 14;
const REVIEW_LEAD_DAYS: u64 = 7;

/// Start and end time of day, as (hour, minute).
#[derive(Clone, Copy, Debug)]
struct Slot {
    start: (u32, u32),
    end: (u32, u32),
}

const KICKOFF_SLOT: Slot = Slot {
    start: (9, 0),
    end: (10, 0),
};
const MILESTONE_SLOT: Slot = Slot {
    start: (17, 0),
    end: (17, 30),
};
const REVIEW_SLOT: Slot = Slot {
    start: (14, 0),
    end: (16, 0),
};

fn time_of_day((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl Slot {
    fn on(self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime, f64) {
        let start = date.and_time(time_of_day(self.start));
        let end = date.and_time(time_of_day(self.end));
        let hours = (end - start).num_minutes() as f64 / 60.0;
        (start, end, hours)
    }
}

/// Tasks that get a milestone marker, in scheduled order.
///
/// A task qualifies when it is categorised as a milestone, has HIGH priority,
/// or another task in the set depends on it.
pub fn milestone_tasks(scheduled: &[ScheduledTask]) -> Vec<&ScheduledTask> {
    let known: FxHashSet<&str> = scheduled.iter().map(|s| s.task.id.as_str()).collect();
    let depended_upon: FxHashSet<&str> = scheduled
        .iter()
        .flat_map(|s| {
            s.task
                .depends_on
                .iter()
                .map(String::as_str)
                .filter(move |dep| *dep != s.task.id)
        })
        .filter(|dep| known.contains(dep))
        .collect();

    scheduled
        .iter()
        .filter(|s| {
            s.task.is_milestone()
                || s.task.priority == Priority::High
                || depended_upon.contains(s.task.id.as_str())
        })
        .collect()
}

struct EventFactory<'a> {
    ctx: &'a ProjectContext,
    color: &'static str,
    id_prefix: String,
}

impl EventFactory<'_> {
    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        suffix: &str,
        title: String,
        description: String,
        date: NaiveDate,
        slot: Slot,
        event_type: EventType,
        task_id: Option<String>,
    ) -> CalendarEvent {
        let (start_time, end_time, duration_hours) = slot.on(date);
        CalendarEvent {
            id: format!("{}-{}", self.id_prefix, suffix),
            title,
            description,
            start_time,
            end_time,
            duration_hours,
            event_type,
            color: self.color.to_string(),
            attendees: self.ctx.attendees.clone(),
            notification_enabled: true,
            task_id,
        }
    }
}

/// Derive the project's calendar events from its scheduled tasks.
pub fn derive_events(
    scheduled: &[ScheduledTask],
    ctx: &ProjectContext,
    verbosity: u8,
) -> Vec<CalendarEvent> {
    let factory = EventFactory {
        ctx,
        color: project_color(&ctx.project_name, &ctx.workspace_id),
        id_prefix: format!("{:08x}", color_seed(&ctx.project_name, &ctx.workspace_id)),
    };
    let reference = ctx.reference_date;
    // Events never start before the reference date, even for a past deadline
    let latest = ctx.deadline.map(|deadline| deadline.max(reference));

    let milestones = milestone_tasks(scheduled);
    let mut events = Vec::with_capacity(milestones.len() + 2);

    events.push(factory.build(
        "kickoff",
        format!("Project Kickoff: {}", ctx.project_name),
        format!(
            "Kickoff for {} ({} tasks scheduled)",
            ctx.project_name,
            scheduled.len()
        ),
        reference,
        KICKOFF_SLOT,
        EventType::Meeting,
        None,
    ));

    for (n, milestone) in milestones.iter().enumerate() {
        let weeks_out = MILESTONE_SPACING_DAYS.saturating_mul(n as i64 + 1);
        let mut date = add_days(reference, weeks_out);
        if let Some(latest) = latest {
            date = date.min(latest);
        }
        let task = &milestone.task;
        let label = if task.title.is_empty() {
            task.id.as_str()
        } else {
            task.title.as_str()
        };
        log_changes!(verbosity, "milestone {} for task {} on {}", n, task.id, date);
        events.push(factory.build(
            &format!("milestone-{n}"),
            format!("Milestone: {label}"),
            format!("Task {} due {}", task.id, milestone.due_date),
            date,
            MILESTONE_SLOT,
            EventType::Deadline,
            Some(task.id.clone()),
        ));
    }

    if let Some(deadline) = ctx.deadline {
        let date = deadline
            .checked_sub_days(Days::new(REVIEW_LEAD_DAYS))
            .unwrap_or(NaiveDate::MIN)
            .max(reference);
        events.push(factory.build(
            "final-review",
            format!("Final Review: {}", ctx.project_name),
            format!("Review all deliverables before the {deadline} deadline"),
            date,
            REVIEW_SLOT,
            EventType::Meeting,
            None,
        ));
    }

    events
}
