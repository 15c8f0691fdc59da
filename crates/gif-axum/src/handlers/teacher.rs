//! Teacher dashboard, classes, reports, class chat and settings.

use axum::extract::Path;
use chrono::Utc;
use serde_json::{Value, json};

use crate::extract::Json;

pub async fn dashboard() -> Json<Value> {
    Json(json!({
        "total_classes": 5,
        "total_students": 120,
        "avg_weekly_usage": "15 hrs",
        "overall_avg_score": "85%",
        "student_performance_overview": [
            {
                "student_name": "Ethan Harper",
                "class": "Mathematics",
                "assigned_parents": "John Doe",
                "attendance": "95%",
                "assignment_complete": "72%",
                "average_score": "88%"
            }
        ],
        "class_statistics": [
            {"subject": "Mathematics", "grade": "Grade 10", "students": 30},
            {"subject": "English Literature", "grade": "Grade 10", "students": 30}
        ],
        "tips_recommendations": [
            {
                "title": "Boost Engagement with Interactive Quizzes",
                "content": "Try gamified learning for student retention."
            }
        ]
    }))
}

pub async fn classes() -> Json<Value> {
    Json(json!([
        {
            "class_name": "10",
            "subject": "Mathematics",
            "weekly_time": "5 hours",
            "average_score": "88%",
            "students": 25,
            "performance": "Excellent",
            "status": "On Track"
        }
    ]))
}

pub async fn class_details(Path(class_id): Path<String>) -> Json<Value> {
    Json(json!({
        "class_id": class_id,
        "subject": "Mathematics",
        "students": [
            {
                "student_name": "Ethan Harper",
                "attendance": "95%",
                "assignments_completed": 8,
                "average_score": "85%"
            }
        ]
    }))
}

pub async fn assignments(Path(_class_id): Path<String>) -> Json<Value> {
    Json(json!([
        {
            "assignment_id": "asg_001",
            "title": "Chapter 5 Algebra Practice",
            "due_date": "2025-11-10",
            "completion_rate": "82%"
        }
    ]))
}

/// Echoes the submitted assignment.
pub async fn create_assignment(
    Path(class_id): Path<String>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    Json(json!({
        "message": "Assignment created successfully",
        "class_id": class_id,
        "assignment": payload
    }))
}

/// Echoes the submitted grades.
pub async fn update_grades(Path(class_id): Path<String>, Json(payload): Json<Value>) -> Json<Value> {
    Json(json!({
        "message": "Grades updated successfully",
        "class_id": class_id,
        "grades": payload
    }))
}

pub async fn class_performance_report() -> Json<Value> {
    Json(json!({
        "overall_avg_score": 85,
        "top_subjects": [
            {"name": "Mathematics", "score": 90},
            {"name": "Science", "score": 88}
        ],
        "weak_subjects": [{"name": "History", "score": 70}],
        "attendance_summary": {
            "avg_attendance": 92,
            "best_class": "Grade 10 Math"
        }
    }))
}

pub async fn conversations() -> Json<Value> {
    Json(json!([
        {"chat_id": "math_9", "subject": "Math", "messages_count": 12, "unread": 2},
        {"chat_id": "science_10", "subject": "Science", "messages_count": 5, "unread": 0}
    ]))
}

pub async fn messages(Path(_chat_id): Path<String>) -> Json<Value> {
    let now = Utc::now();
    Json(json!([
        {"sender": "Teacher", "message": "Hi everyone!", "timestamp": now},
        {"sender": "Student", "message": "Hello!", "timestamp": now}
    ]))
}

pub async fn post_message(Path(chat_id): Path<String>, Json(payload): Json<Value>) -> Json<Value> {
    Json(json!({
        "message": "Message sent successfully",
        "chat_id": chat_id,
        "payload": payload
    }))
}

pub async fn settings() -> Json<Value> {
    Json(json!({
        "name": "Teacher",
        "email": "teacher@example.com",
        "role": "teacher",
        "preferences": {
            "language": "English",
            "theme": "light",
            "notification_enabled": true
        }
    }))
}
