/// Read-only client methods shared by every resource client.
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                // Lookups by id are only issued from tests today.
                #[allow(dead_code)]
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: <$entity as crate::actor_framework::Entity>::Id,
                ) -> Result<Option<$entity>, crate::actor_framework::FrameworkError> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](
                    &self,
                ) -> Result<Vec<$entity>, crate::actor_framework::FrameworkError> {
                    tracing::debug!("Sending request");
                    self.inner.list().await
                }
            }
        }
    };
}

macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_methods!($client_name, $entity, $entity_name_snake);
    };
}
