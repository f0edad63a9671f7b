#[derive(Debug, serde::Deserialize)]
pub struct SigninDTO {
    pub email: String,
    pub password: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SigninResponseDTO {
    pub id: String,
    pub email: String,
    pub access_token: String,
}

pub type SignupResponseDTO = SigninResponseDTO;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SignupRequestDTO {
    pub email: String,
    pub password: String,
    pub name: String,
}
