use serde::{Deserialize, Serialize};

use crate::models::assignments::entities::Assignment;

// 作业列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
}
