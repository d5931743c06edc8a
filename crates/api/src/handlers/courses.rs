use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::TryStreamExt;

use course_core::model::{CourseId, SummaryStyle};
use services::{CourseServiceError, CourseUpdate, MAX_UPLOAD_FILES, NewCourseRequest, UploadedFile};

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{
    CourseResponse, CreateCourseRequest, EnsureQuizRequest, MessageResponse, ReviewQuizRequest, ReviewQuizResponse,
    SubmitQuizRequest, SubmitQuizResponse, SummaryStyleRequest, UpdateCourseRequest,
};
use crate::state::AppState;

/// Upper bound for a single uploaded file.
const MAX_FILE_BYTES: usize = 20 * 1024 * 1024;

pub async fn create_course(
    data: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let request = read_course_form(payload).await?;
    let course = data.courses.create_course(request).await?;
    Ok(HttpResponse::Created().json(CourseResponse::from(course)))
}

/// Same as `create_course` for clients that post `{title, content}` as JSON.
pub async fn create_course_json(
    data: web::Data<AppState>,
    req: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, ApiError> {
    let course = data
        .courses
        .create_course(req.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(CourseResponse::from(course)))
}

/// Collect `title`, `content` and up to ten `files` parts; other parts are ignored.
async fn read_course_form(mut payload: Multipart) -> Result<NewCourseRequest, ApiError> {
    let mut request = NewCourseRequest::default();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_owned();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > MAX_FILE_BYTES {
                return Err(ApiError::BadRequest(format!(
                    "field {name} exceeds {MAX_FILE_BYTES} bytes"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "files" => {
                if request.files.len() == MAX_UPLOAD_FILES {
                    return Err(CourseServiceError::TooManyFiles {
                        max: MAX_UPLOAD_FILES,
                    }
                    .into());
                }
                let filename = filename.unwrap_or_else(|| format!("file-{}", request.files.len() + 1));
                request.files.push(UploadedFile::new(filename, bytes));
            }
            "title" => request.title = text_field(&name, bytes)?,
            "content" => request.content = Some(text_field(&name, bytes)?),
            other => log::debug!("ignoring multipart field {other}"),
        }
    }

    Ok(request)
}

fn text_field(name: &str, bytes: Vec<u8>) -> Result<String, ApiError> {
    String::from_utf8(bytes).map_err(|_| ApiError::BadRequest(format!("field {name} is not UTF-8")))
}

pub async fn list_courses(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let courses = data.courses.list_courses().await?;
    let body: Vec<CourseResponse> = courses.into_iter().map(CourseResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub async fn get_course(
    data: web::Data<AppState>,
    path: web::Path<CourseId>,
) -> Result<HttpResponse, ApiError> {
    let course = data.courses.get_course(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CourseResponse::from(course)))
}

pub async fn update_course(
    data: web::Data<AppState>,
    path: web::Path<CourseId>,
    req: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    let course = data
        .courses
        .update_course(
            path.into_inner(),
            CourseUpdate {
                title: req.title,
                content: req.content,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(CourseResponse::from(course)))
}

pub async fn delete_course(
    data: web::Data<AppState>,
    path: web::Path<CourseId>,
) -> Result<HttpResponse, ApiError> {
    data.courses.delete_course(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Course deleted successfully".into(),
    }))
}

pub async fn restyle_summary(
    data: web::Data<AppState>,
    path: web::Path<CourseId>,
    req: web::Json<SummaryStyleRequest>,
) -> Result<HttpResponse, ApiError> {
    let style = match req.style.as_deref() {
        None => SummaryStyle::default(),
        Some(raw) => raw
            .parse::<SummaryStyle>()
            .map_err(CourseServiceError::from)?,
    };
    let course = data
        .courses
        .restyle_summary(path.into_inner(), style)
        .await?;
    Ok(HttpResponse::Ok().json(CourseResponse::from(course)))
}

pub async fn ensure_quiz(
    data: web::Data<AppState>,
    path: web::Path<CourseId>,
    req: web::Json<EnsureQuizRequest>,
) -> Result<HttpResponse, ApiError> {
    let course = data
        .courses
        .ensure_quiz_count(path.into_inner(), req.count())
        .await?;
    Ok(HttpResponse::Ok().json(CourseResponse::from(course)))
}

pub async fn submit_quiz(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<CourseId>,
    req: web::Json<SubmitQuizRequest>,
) -> Result<HttpResponse, ApiError> {
    let progress = data
        .progress
        .submit_quiz_result(
            user.user_id,
            path.into_inner(),
            req.questions_answered,
            req.correct_answers,
        )
        .await?;
    Ok(HttpResponse::Ok().json(SubmitQuizResponse {
        success: true,
        progress,
    }))
}

pub async fn review_quiz(
    data: web::Data<AppState>,
    path: web::Path<CourseId>,
    req: web::Json<ReviewQuizRequest>,
) -> Result<HttpResponse, ApiError> {
    let explanation = data
        .courses
        .review_quiz(path.into_inner(), &req.questions, &req.answers())
        .await?;
    Ok(HttpResponse::Ok().json(ReviewQuizResponse { explanation }))
}
