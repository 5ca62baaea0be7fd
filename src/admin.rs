//! Declarative admin descriptors for faculties and students, plus the student bulk actions.

use crate::error::AppError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Column {
    pub field: &'static str,
    pub label: &'static str,
}

/// A titled group of form fields. Each inner slice is one form row.
#[derive(Debug, Serialize)]
pub struct Fieldset {
    pub title: &'static str,
    pub rows: &'static [&'static [&'static str]],
    pub collapsed: bool,
}

#[derive(Debug, Serialize)]
pub struct ActionInfo {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelAdmin {
    pub model: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: &'static [Column],
    pub list_filter: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub list_editable: &'static [&'static str],
    pub ordering: &'static [&'static str],
    pub fieldsets: &'static [Fieldset],
    pub readonly_fields: &'static [&'static str],
    pub actions: &'static [ActionInfo],
}

pub static FACULTY_ADMIN: ModelAdmin = ModelAdmin {
    model: "faculty",
    verbose_name: "Faculty",
    verbose_name_plural: "Faculties",
    list_display: &[
        Column { field: "name", label: "Name" },
        Column { field: "dean", label: "Dean" },
        Column { field: "established_date", label: "Established date" },
        Column { field: "student_count", label: "Active Students" },
    ],
    list_filter: &["established_date"],
    search_fields: &["name", "dean", "description"],
    list_editable: &[],
    ordering: &["name"],
    fieldsets: &[
        Fieldset {
            title: "Basic Information",
            rows: &[&["name"], &["description"]],
            collapsed: false,
        },
        Fieldset {
            title: "Administration",
            rows: &[&["dean"], &["established_date"]],
            collapsed: true,
        },
    ],
    readonly_fields: &[],
    actions: &[],
};

pub static STUDENT_ADMIN: ModelAdmin = ModelAdmin {
    model: "student",
    verbose_name: "Student",
    verbose_name_plural: "Students",
    list_display: &[
        Column { field: "full_name", label: "Full Name" },
        Column { field: "student_id", label: "Student id" },
        Column { field: "email", label: "Email" },
        Column { field: "faculty", label: "Faculty" },
        Column { field: "enrollment_date", label: "Enrollment date" },
        Column { field: "is_active", label: "Is active" },
    ],
    list_filter: &["faculty", "is_active", "enrollment_date", "graduation_year"],
    search_fields: &["first_name", "last_name", "email", "student_id"],
    list_editable: &["is_active"],
    ordering: &["last_name", "first_name"],
    fieldsets: &[
        Fieldset {
            title: "Personal Information",
            rows: &[
                &["first_name", "last_name"],
                &["email"],
                &["date_of_birth"],
                &["phone_number"],
                &["address"],
            ],
            collapsed: false,
        },
        Fieldset {
            title: "Academic Information",
            rows: &[
                &["student_id"],
                &["faculty"],
                &["enrollment_date"],
                &["graduation_year"],
                &["is_active"],
            ],
            collapsed: false,
        },
        Fieldset {
            title: "Metadata",
            rows: &[&["created_at", "updated_at"]],
            collapsed: true,
        },
    ],
    readonly_fields: &["created_at", "updated_at"],
    actions: &[
        ActionInfo {
            name: "mark_inactive",
            description: "Mark selected students as inactive",
        },
        ActionInfo {
            name: "mark_active",
            description: "Mark selected students as active",
        },
    ],
};

/// Bulk state toggles over a selection of students.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkAction {
    MarkInactive,
    MarkActive,
}

impl std::str::FromStr for BulkAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mark_inactive" => Ok(BulkAction::MarkInactive),
            "mark_active" => Ok(BulkAction::MarkActive),
            _ => Err(AppError::BadRequest(format!("unknown action: {}", s))),
        }
    }
}

impl BulkAction {
    pub fn name(self) -> &'static str {
        match self {
            BulkAction::MarkInactive => "mark_inactive",
            BulkAction::MarkActive => "mark_active",
        }
    }

    /// The `is_active` value the action writes.
    pub fn target(self) -> bool {
        matches!(self, BulkAction::MarkActive)
    }

    pub fn message(self, updated: u64) -> String {
        let state = if self.target() { "active" } else { "inactive" };
        format!("{} students were successfully marked as {}.", updated, state)
    }
}
