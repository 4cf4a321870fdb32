use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct IdConfig {
    /// Env: FID_HTTP_PORT
    #[envconfig(from = "FID_HTTP_PORT", default = "8080")]
    pub http_port: u16,

    /// Length of the generated identity token.
    /// Env: FID_ID_LENGTH
    #[envconfig(from = "FID_ID_LENGTH", default = "24")]
    pub id_length: usize,
}
