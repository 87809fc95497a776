use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::project::{Project, Subcontractor};
use super::task::{SiteTask, Task, TaskStatus};

/// Everything a store holds: projects, their subcontractors, and all tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub projects: Vec<Project>,
    pub subcontractors: Vec<Subcontractor>,
    pub tasks: Vec<Task>,
}

impl Schedule {
    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn subcontractors_for(&self, project_id: Uuid) -> Vec<&Subcontractor> {
        self.subcontractors
            .iter()
            .filter(|s| s.project_id == project_id)
            .collect()
    }

    pub fn tasks_for(&self, project_id: Uuid) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.payload.project_id == project_id)
            .cloned()
            .collect()
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Demo data written on first launch.
    pub fn sample() -> Self {
        let mut house = Project::new("189 Quackenbush – New House", ymd(2023, 10, 1));
        house.address = "189 Quackenbush Ln, Upstate NY".into();
        house.description =
            "Ground-up residential construction of a 2,500 sqft single family home.".into();

        let mut office = Project::new("Downtown Office Reno", ymd(2023, 11, 15));
        office.address = "400 Main St, Suite 300".into();
        office.description = "Renovation of commercial office space.".into();

        let sub = |project: &Project, name: &str, trade: &str, color: Color32| {
            let mut s = Subcontractor::new(project.id, name, trade);
            s.color = color;
            s
        };
        let excavation = sub(&house, "ABC Excavation", "Excavator", Color32::from_rgb(180, 83, 9));
        let concrete = sub(&house, "Solid Foundations", "Concrete", Color32::from_rgb(100, 116, 139));
        let framing = sub(&house, "Top Notch Framing", "Framer", Color32::from_rgb(22, 163, 74));
        let electric = sub(&house, "Sparky Electric", "Electrician", Color32::from_rgb(234, 179, 8));
        let plumbing = sub(&house, "Flow Plumbing", "Plumber", Color32::from_rgb(37, 99, 235));
        let demolition = sub(&office, "City Demolition", "Demolition", Color32::from_rgb(220, 38, 38));

        let task = |s: &Subcontractor,
                    name: &str,
                    start: NaiveDate,
                    end: NaiveDate,
                    status: TaskStatus,
                    cost: f64| {
            let mut payload = SiteTask::new(s.project_id, name);
            payload.status = status;
            payload.estimated_cost = cost;
            Task::new(s.id, start, end, payload)
        };
        use TaskStatus::*;
        let tasks = vec![
            task(&excavation, "Site Clearing", ymd(2023, 10, 1), ymd(2023, 10, 5), Completed, 5_000.0),
            task(&excavation, "Excavation", ymd(2023, 10, 6), ymd(2023, 10, 12), Completed, 10_000.0),
            task(&concrete, "Footings", ymd(2023, 10, 13), ymd(2023, 10, 20), InProgress, 12_000.0),
            task(&concrete, "Foundation Walls", ymd(2023, 10, 21), ymd(2023, 10, 28), Planned, 16_000.0),
            task(&framing, "First Floor Framing", ymd(2023, 10, 30), ymd(2023, 11, 15), Planned, 20_000.0),
            task(&framing, "Second Floor Framing", ymd(2023, 11, 16), ymd(2023, 11, 30), Planned, 25_000.0),
            task(&plumbing, "Plumbing Rough-in", ymd(2023, 11, 20), ymd(2023, 12, 5), Planned, 18_000.0),
            task(&electric, "Electrical Rough-in", ymd(2023, 11, 25), ymd(2023, 12, 10), Planned, 22_000.0),
        ];

        Self {
            projects: vec![house, office],
            subcontractors: vec![excavation, concrete, framing, electric, plumbing, demolition],
            tasks,
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
