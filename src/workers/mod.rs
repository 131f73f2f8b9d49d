pub mod subscription_checker;
