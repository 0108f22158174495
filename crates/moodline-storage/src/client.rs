use aws_sdk_s3::Client;

/// S3 client sharing the region and credentials already resolved for the
/// service.
pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Client {
    Client::new(config)
}
