use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{CreateCourseRequest, EnrollRequest};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::{SafeCourseCode, SafeIDI64};

// 懒加载的全局 COURSE_SERVICE 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn list_my_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_my_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn enroll(
    req: HttpRequest,
    enroll_data: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.enroll(&req, enroll_data.into_inner()).await
}

pub async fn get_course_detail(
    req: HttpRequest,
    course_code: SafeCourseCode,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course_detail(&req, course_code.0).await
}

pub async fn delete_course(
    req: HttpRequest,
    course_code: SafeCourseCode,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, course_code.0).await
}

pub async fn join_as_sub_professor(
    req: HttpRequest,
    course_code: SafeCourseCode,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .join_as_sub_professor(&req, course_code.0)
        .await
}

pub async fn leave_as_sub_professor(
    req: HttpRequest,
    course_code: SafeCourseCode,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .leave_as_sub_professor(&req, course_code.0)
        .await
}

pub async fn list_students(
    req: HttpRequest,
    course_code: SafeCourseCode,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_students(&req, course_code.0).await
}

pub async fn remove_student(
    req: HttpRequest,
    course_code: SafeCourseCode,
    student_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .remove_student(&req, course_code.0, student_id.0)
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                // 用户查询自己的课程列表
                web::resource("").route(web::get().to(list_my_courses)).route(
                    web::post()
                        .to(create_course)
                        // 教授创建课程
                        .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                ),
            )
            .service(
                web::resource("/enroll").route(
                    web::post()
                        .to(enroll)
                        // 学生凭课程代码选课，限流防代码枚举
                        .wrap(middlewares::RateLimit::enroll())
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{course_code}")
                    // 课程详情：教授/已选课学生，业务层校验
                    .route(web::get().to(get_course_detail))
                    .route(
                        web::delete()
                            .to(delete_course)
                            // 删除课程：仅主讲教授（业务层校验主讲身份）
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::professor_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/{course_code}/sub-professors")
                    .route(
                        web::post()
                            .to(join_as_sub_professor)
                            // 教授加入其他教授的课程做副教授
                            .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                    )
                    .route(
                        web::delete()
                            .to(leave_as_sub_professor)
                            // 副教授退出课程（主讲不可退出）
                            .wrap(middlewares::RequireRole::new(&UserRole::Professor)),
                    ),
            )
            .service(
                web::resource("/{course_code}/students").route(
                    web::get()
                        .to(list_students)
                        // 查看学生名单：主讲/副教授
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::professor_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/{course_code}/students/{id}").route(
                    web::delete()
                        .to(remove_student)
                        // 移出学生：主讲/副教授
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::professor_roles(),
                        )),
                ),
            )
            .service(
                // 学生在课程内的成绩单：本人或课程教授（业务层校验）
                web::resource("/{course_code}/students/{id}/grades")
                    .route(web::get().to(super::submissions::get_course_grades)),
            ),
    );
}
