use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct OperatorConfig {
    /// Identity endpoint reachable through the cluster-local address.
    /// Env: FOM_INT_URL
    #[envconfig(from = "FOM_INT_URL")]
    pub int_url: String,

    /// Identity endpoint reachable through the externally routed (DNS)
    /// address.
    /// Env: FOM_EXT_URL
    #[envconfig(from = "FOM_EXT_URL")]
    pub ext_url: String,

    /// Seconds to sleep between reconciliation cycles.
    /// Env: FOM_POLL_PERIOD_SECS
    #[envconfig(from = "FOM_POLL_PERIOD_SECS", default = "30")]
    pub poll_period_secs: u64,

    /// Base URL of the Kubernetes API server.
    /// Env: FOM_API_SERVER
    #[envconfig(
        from = "FOM_API_SERVER",
        default = "https://kubernetes.default.svc"
    )]
    pub api_server: String,

    /// Debug mode disables CA-bundle strictness. Test/dev only.
    /// Env: FOM_DEBUG
    #[envconfig(from = "FOM_DEBUG", default = "false")]
    pub debug: bool,

    /// Timeout applied to every outbound network call.
    /// Env: FOM_REQUEST_TIMEOUT_SECS
    #[envconfig(from = "FOM_REQUEST_TIMEOUT_SECS", default = "10")]
    pub request_timeout_secs: u64,

    /// Port for the operator's own health endpoints.
    /// Env: FOM_HTTP_PORT
    #[envconfig(from = "FOM_HTTP_PORT", default = "8086")]
    pub http_port: u16,

    /// Env: FOM_TOKEN_PATH
    #[envconfig(
        from = "FOM_TOKEN_PATH",
        default = "/var/run/secrets/kubernetes.io/serviceaccount/token"
    )]
    pub token_path: String,

    /// Env: FOM_CA_PATH
    #[envconfig(
        from = "FOM_CA_PATH",
        default = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt"
    )]
    pub ca_path: String,
}
