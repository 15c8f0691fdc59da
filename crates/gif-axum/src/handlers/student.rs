//! Student dashboard, learning path, lessons and reports.

use axum::Json;
use axum::extract::Path;
use serde_json::{Value, json};

use super::placeholder;
use crate::error::HttpError;

pub async fn dashboard() -> Json<Value> {
    Json(json!({
        "userId": "demo-user-123",
        "progress": 85,
        "weekly_activity": [60, 75, 80, 90, 100],
        "subjects": [
            {"name": "Math", "progress": 90},
            {"name": "Science", "progress": 80},
            {"name": "English", "progress": 85}
        ],
        "recommendations": ["Revise Algebra", "Watch Physics Lecture 3"]
    }))
}

pub async fn learning_path() -> Json<Value> {
    Json(json!({
        "userId": "demo-user-123",
        "paths": [
            {"subject": "Math", "modules": 8, "completed": 5},
            {"subject": "Science", "modules": 10, "completed": 7}
        ],
        "progress_chart": {
            "labels": ["Week 1", "Week 2", "Week 3", "Week 4"],
            "data": [70, 75, 80, 85]
        },
        "achievements": [
            {"title": "Top 10% in Class", "date": "2025-10-01"},
            {"title": "Completed Science Path", "date": "2025-09-20"}
        ]
    }))
}

pub async fn lessons() -> Json<Value> {
    Json(json!({
        "lessons": [
            {"lesson_id": "L001", "title": "Photosynthesis", "status": "In Progress"},
            {"lesson_id": "L002", "title": "Newton's Laws", "status": "Completed"}
        ]
    }))
}

pub async fn lesson_history() -> Json<Value> {
    Json(json!({
        "history": [
            {"lesson_id": "L002", "title": "Newton's Laws", "completed_on": "2025-10-10", "score": 92},
            {"lesson_id": "L003", "title": "Periodic Table", "completed_on": "2025-09-28", "score": 88}
        ]
    }))
}

/// One lesson's conversation transcript; unknown ids are 404.
pub async fn lesson(Path(lesson_id): Path<String>) -> Result<Json<Value>, HttpError> {
    let lesson = match lesson_id.as_str() {
        "L001" => json!({
            "title": "Photosynthesis",
            "content": [
                {"type": "text", "message": "What is the process by which plants make food?"},
                {"type": "student", "message": "Photosynthesis!"},
                {"type": "text", "message": "Correct! Plants use sunlight to convert CO2 and water into glucose."}
            ],
            "status": "In Progress",
            "score": null
        }),
        "L002" => json!({
            "title": "Newton's Laws",
            "content": [
                {"type": "text", "message": "What is inertia?"},
                {"type": "student", "message": "Resistance to motion change."},
                {"type": "text", "message": "Excellent! That's Newton's First Law."}
            ],
            "status": "Completed",
            "score": 92
        }),
        _ => return Err(HttpError::NotFound("Lesson not found".to_string())),
    };
    Ok(Json(lesson))
}

pub async fn time_tracking_report() -> Json<Value> {
    placeholder("student/reports/time-tracking")
}

pub async fn academic_performance_report() -> Json<Value> {
    placeholder("student/reports/academic-performance")
}

pub async fn topics_summary_report() -> Json<Value> {
    placeholder("student/reports/topics-summary")
}
