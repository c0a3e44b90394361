// Sales tables are created at runtime by the store; pipeline_locks by migration.

diesel::table! {
    ventas_historicas (historical_period) {
        historical_period -> Integer,
        actual_sales -> Double,
    }
}

diesel::table! {
    ml_prediccion_ventas (predicted_period) {
        prediction_date -> Date,
        predicted_period -> Integer,
        predicted_sales -> Double,
        model_version -> Text,
    }
}

diesel::table! {
    pipeline_locks (name) {
        name -> Text,
        holder -> Text,
        acquired_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(ventas_historicas, ml_prediccion_ventas, pipeline_locks,);

/// DDL for the history table, used when the table has to be (re)created.
pub const CREATE_VENTAS_HISTORICAS: &str = "CREATE TABLE ventas_historicas (
    historical_period INTEGER PRIMARY KEY NOT NULL,
    actual_sales DOUBLE NOT NULL
)";

/// DDL for the forecast table, recreated on every replace.
pub const CREATE_ML_PREDICCION_VENTAS: &str = "CREATE TABLE ml_prediccion_ventas (
    prediction_date DATE NOT NULL,
    predicted_period INTEGER PRIMARY KEY NOT NULL,
    predicted_sales DOUBLE NOT NULL,
    model_version TEXT NOT NULL
)";
