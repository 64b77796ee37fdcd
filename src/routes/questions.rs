use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::questions::requests::{CreateAnswerRequest, CreateQuestionRequest};
use crate::models::users::entities::UserRole;
use crate::services::QuestionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 QUESTION_SERVICE 实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

// 学生提问
pub async fn ask_question(
    req: HttpRequest,
    body: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.ask_question(&req, body.into_inner()).await
}

// 作业下的问题列表
pub async fn list_assignment_questions(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .list_assignment_questions(&req, path.0)
        .await
}

// 教授名下课程的全部问题
pub async fn list_my_questions(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.list_my_questions(&req).await
}

// 教授回答问题
pub async fn answer_question(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CreateAnswerRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .answer_question(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_questions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(ask_question)
                        // 仅学生提问
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/my").route(
                    web::get()
                        .to(list_my_questions)
                        // 教授的答疑收件箱
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::professor_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/{id}/answers").route(
                    web::post()
                        .to(answer_question)
                        // 回答问题：教授与管理员（课程权限在业务层校验）
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::professor_roles(),
                        )),
                ),
            ),
    );
}
