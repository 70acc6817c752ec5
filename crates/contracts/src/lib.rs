pub mod subscription_matching;
