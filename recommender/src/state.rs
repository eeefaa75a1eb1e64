use crate::service::RecommendationService;

pub struct AppState {
    pub service: RecommendationService,
}
