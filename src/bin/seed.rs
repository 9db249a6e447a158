//! Seed script for development: populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use sqlx::PgPool;

const ADMIN_EMAIL: &str = "admin@campus.local";
const ADMIN_PASSWORD: &str = "Test123!";
const TEACHER_PASSWORD: &str = "teacher123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = campus_dashboard::db::create_pool(&db_url, 5).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== Campus Dashboard Seed Script ===");

    seed_users(&pool).await?;
    seed_departments_and_subjects(&pool).await?;
    seed_classes(&pool).await?;

    println!("\n=== Seed complete! ===");
    println!("Admin login: {ADMIN_EMAIL} / {ADMIN_PASSWORD}");

    Ok(())
}

async fn seed_users(pool: &PgPool) -> anyhow::Result<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(ADMIN_EMAIL)
        .fetch_one(pool)
        .await?;

    let hash = campus_dashboard::services::session::hash_password(ADMIN_PASSWORD)?;

    if exists {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE email = $2")
            .bind(&hash)
            .bind(ADMIN_EMAIL)
            .execute(pool)
            .await?;
        println!("[done] Updated admin password");
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO users (name, email, role, password_hash, created_at)
         VALUES ('Campus Administrator', $1, 'admin', $2, NOW() - INTERVAL '90 days')",
    )
    .bind(ADMIN_EMAIL)
    .bind(&hash)
    .execute(pool)
    .await?;

    let teacher_hash = campus_dashboard::services::session::hash_password(TEACHER_PASSWORD)?;
    let people = vec![
        ("Ada Lovelace", "ada@campus.local", Some("teacher"), Some(60)),
        ("Alan Turing", "alan@campus.local", Some("teacher"), Some(30)),
        ("Grace Hopper", "grace@campus.local", Some("teacher"), Some(7)),
        ("Edsger Dijkstra", "edsger@campus.local", Some("teacher"), None),
        ("Barbara Liskov", "barbara@campus.local", Some("student"), Some(3)),
        ("Donald Knuth", "donald@campus.local", Some("student"), Some(1)),
        ("Guest Account", "guest@campus.local", None, None),
    ];

    for (name, email, role, days_ago) in &people {
        sqlx::query(
            "INSERT INTO users (name, email, role, password_hash, created_at)
             VALUES ($1, $2, $3, $4,
                     CASE WHEN $5::int IS NULL THEN NULL ELSE NOW() - make_interval(days => $5::int) END)",
        )
        .bind(name)
        .bind(email)
        .bind(role)
        .bind(&teacher_hash)
        .bind(days_ago)
        .execute(pool)
        .await?;
    }

    println!("[done] Created admin and {} sample users", people.len());
    Ok(())
}

async fn seed_departments_and_subjects(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Departments already exist ({count})");
        return Ok(());
    }

    let catalog = vec![
        ("Science", vec!["Biology", "Chemistry", "Physics"]),
        ("Mathematics", vec!["Algebra", "Geometry"]),
        ("Humanities", vec!["History"]),
    ];

    for (department, subjects) in &catalog {
        let department_id: i64 =
            sqlx::query_scalar("INSERT INTO departments (name) VALUES ($1) RETURNING id")
                .bind(department)
                .fetch_one(pool)
                .await?;

        for subject in subjects {
            sqlx::query("INSERT INTO subjects (name, department_id) VALUES ($1, $2)")
                .bind(subject)
                .bind(department_id)
                .execute(pool)
                .await?;
        }
    }

    // A subject with no department shows up as "Unassigned".
    sqlx::query("INSERT INTO subjects (name, department_id) VALUES ('Study Hall', NULL)")
        .execute(pool)
        .await?;

    println!("[done] Created {} departments and their subjects", catalog.len());
    Ok(())
}

async fn seed_classes(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM classes")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Classes already exist ({count})");
        return Ok(());
    }

    let classes = vec![
        ("Biology 1A", Some("Biology"), Some("ada@campus.local"), Some(40)),
        ("Biology 1B", Some("Biology"), Some("alan@campus.local"), Some(20)),
        ("Chemistry Lab", Some("Chemistry"), Some("grace@campus.local"), Some(10)),
        ("Algebra I", Some("Algebra"), Some("ada@campus.local"), Some(5)),
        ("Algebra II", Some("Algebra"), None, Some(2)),
        ("World History", Some("History"), Some("edsger@campus.local"), None),
        ("Open Workshop", None, None, Some(1)),
    ];

    for (name, subject, teacher_email, days_ago) in &classes {
        sqlx::query(
            "INSERT INTO classes (name, subject_id, teacher_id, created_at)
             VALUES (
                 $1,
                 (SELECT id FROM subjects WHERE name = $2 LIMIT 1),
                 (SELECT id FROM users WHERE email = $3 LIMIT 1),
                 CASE WHEN $4::int IS NULL THEN NULL ELSE NOW() - make_interval(days => $4::int) END
             )",
        )
        .bind(name)
        .bind(subject)
        .bind(teacher_email)
        .bind(days_ago)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} sample classes", classes.len());
    Ok(())
}
