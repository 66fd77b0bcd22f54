pub const SINGLE_FOOD_PROMPT: &str = "作为一名资深的老年糖尿病营养专家，请分析照片中的食物。请识别食物名称、估算GI值（血糖生成指数）、每100克含糖量和碳水化合物量，并针对老年糖尿病人给出简短、通俗易懂的食用建议。请以JSON格式返回，包含：name, giValue, giRating(低GI/中GI/高GI), sugarPer100g, carbsPer100g, advice, portionSize。";

pub const MEAL_PROMPT: &str = "这是一顿正餐的照片。请识别餐盘中所有的食物，并估算整餐的总含糖量（克）和总碳水化合物量（克）。请以JSON格式返回，包含食物列表(foods)以及总和数据。";

pub fn speech_prompt(text: &str) -> String {
    format!("请用和蔼可亲、语速较慢的语气读出以下建议：{text}")
}
