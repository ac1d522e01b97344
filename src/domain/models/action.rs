pub enum Action {
    SubmitQuestion(String),
}
