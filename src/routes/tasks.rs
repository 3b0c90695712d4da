use crate::{
    auth::AuthenticatedPrincipal, error::AppError, models::TaskInput, tasks::TaskService,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use uuid::Uuid;

/// Retrieves all tasks owned by the authenticated user, newest first.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid access token.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    principal: AuthenticatedPrincipal,
) -> Result<impl Responder, AppError> {
    let owned = tasks.list(principal.email()).await?;
    Ok(HttpResponse::Ok().json(owned))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: The title of the task (required, 1..=200 characters).
/// - `description` (optional): Up to 1000 characters.
/// - `due_date` (optional): RFC 3339 timestamp.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task`.
/// - `401 Unauthorized`: If the request lacks a valid access token.
/// - `422 Unprocessable Entity`: If input validation fails.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    principal: AuthenticatedPrincipal,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .create(task_data.into_inner(), principal.email())
        .await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: The `Task`.
/// - `403 Forbidden`: The task belongs to someone else.
/// - `404 Not Found`: No task with this ID.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    principal: AuthenticatedPrincipal,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = tasks.get(task_id.into_inner(), principal.email()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Marks a task as completed.
///
/// ## Responses:
/// - `200 OK`: The updated `Task`.
/// - `403 Forbidden`: The task belongs to someone else.
/// - `404 Not Found`: No task with this ID.
#[patch("/{id}")]
pub async fn complete_task(
    tasks: web::Data<TaskService>,
    principal: AuthenticatedPrincipal,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .complete(task_id.into_inner(), principal.email())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task and returns it as it was.
///
/// ## Responses:
/// - `200 OK`: The deleted `Task`.
/// - `403 Forbidden`: The task belongs to someone else.
/// - `404 Not Found`: No task with this ID.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    principal: AuthenticatedPrincipal,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = tasks.delete(task_id.into_inner(), principal.email()).await?;
    Ok(HttpResponse::Ok().json(task))
}
