use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DueTask<T> {
    pub handle: TaskHandle,
    pub at: Instant,
    pub task: T,
}

struct ScheduledTask<T> {
    handle: TaskHandle,
    due: Instant,
    period: Option<Duration>,
    task: T,
}

pub struct Scheduler<T> {
    tasks: Vec<ScheduledTask<T>>,
    next_id: u64,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) -> TaskHandle {
        self.insert(now + delay, None, task)
    }

    pub fn schedule_repeating(&mut self, now: Instant, period: Duration, task: T) -> TaskHandle {
        let period = period.max(Duration::from_millis(1));
        self.insert(now + period, Some(period), task)
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|scheduled| scheduled.handle != handle);
        self.tasks.len() != before
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|scheduled| scheduled.due).min()
    }

    /// Pops the earliest task due at or before `now`. Repeating tasks are
    /// re-armed one period after their previous deadline, so a late poll
    /// yields every missed occurrence in order.
    pub fn pop_due(&mut self, now: Instant) -> Option<DueTask<T>> {
        let position = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, scheduled)| scheduled.due <= now)
            .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.handle.0))
            .map(|(index, _)| index)?;

        let scheduled = &mut self.tasks[position];
        let due = DueTask {
            handle: scheduled.handle,
            at: scheduled.due,
            task: scheduled.task.clone(),
        };

        match scheduled.period {
            Some(period) => scheduled.due += period,
            None => {
                self.tasks.remove(position);
            }
        }

        Some(due)
    }

    fn insert(&mut self, due: Instant, period: Option<Duration>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            handle,
            due,
            period,
            task,
        });
        handle
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_one_shot_fires_once_after_delay() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(t0, secs(3), "reveal");

        assert!(scheduler.pop_due(t0 + secs(2)).is_none());

        let due = scheduler.pop_due(t0 + secs(3)).expect("task should be due");
        assert_eq!(due.handle, handle);
        assert_eq!(due.task, "reveal");
        assert!(scheduler.pop_due(t0 + secs(10)).is_none());
        assert!(scheduler.next_due().is_none());
    }

    #[test]
    fn test_repeating_catches_up_in_order() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(t0, secs(1), "tick");

        let mut fired = Vec::new();
        while let Some(due) = scheduler.pop_due(t0 + secs(3)) {
            fired.push(due.at);
        }

        assert_eq!(fired, vec![t0 + secs(1), t0 + secs(2), t0 + secs(3)]);
        assert_eq!(scheduler.next_due(), Some(t0 + secs(4)));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new();
        let tick = scheduler.schedule_repeating(t0, secs(1), 1);
        let reveal = scheduler.schedule(t0, secs(2), 2);

        assert!(scheduler.cancel(tick));
        assert!(!scheduler.cancel(tick));

        let due = scheduler.pop_due(t0 + secs(5)).expect("reveal still pending");
        assert_eq!(due.handle, reveal);
        assert!(scheduler.next_due().is_none());
    }

    #[test]
    fn test_earliest_deadline_wins() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(t0, secs(5), "late");
        scheduler.schedule(t0, secs(1), "early");

        assert_eq!(scheduler.pop_due(t0 + secs(6)).map(|d| d.task), Some("early"));
        assert_eq!(scheduler.pop_due(t0 + secs(6)).map(|d| d.task), Some("late"));
    }
}
